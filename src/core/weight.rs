use crate::domain::model::{MetricsInput, PackageMetrics};

/// cm³ per kilogram used by the volumetric formula.
pub const VOLUMETRIC_DIVISOR: f64 = 6000.0;

pub struct WeightCalculator;

impl WeightCalculator {
    /// Volumetric weight in grams.
    pub fn volumetric(length: f64, width: f64, height: f64) -> f64 {
        (length * width * height) / VOLUMETRIC_DIVISOR * 1000.0
    }

    /// Resolves the billable weight and returns the metrics set to send.
    ///
    /// - dimensions only: weight becomes the volumetric weight
    /// - weight and dimensions: the larger of the two
    /// - weight only (or a bare number): the weight as given
    ///
    /// Diameter is carried through untouched.
    pub fn resolve(input: MetricsInput) -> PackageMetrics {
        let mut metrics = match input {
            MetricsInput::Weight(weight) => return PackageMetrics::with_weight(weight),
            MetricsInput::Metrics(metrics) => metrics,
        };

        if let Some((l, w, h)) = metrics.dimensions() {
            let volumetric = Self::volumetric(l, w, h);
            metrics.weight = Some(match metrics.weight {
                Some(explicit) if explicit >= volumetric => explicit,
                _ => volumetric,
            });
        }

        metrics
    }
}
