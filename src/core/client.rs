use crate::core::dispatcher::{PreparedCost, RequestDispatcher};
use crate::core::gate::ValidationGate;
use crate::core::location::LocationResolver;
use crate::core::policy::AccountPolicy;
use crate::core::weight::WeightCalculator;
use crate::domain::model::{
    AccountTier, CostRequest, CourierCode, LocationInput, MetricsInput, PolicyCode,
    ValidationError,
};
use crate::domain::ports::{HttpMethod, RawResponse, RequestParams, Transport};
use crate::utils::error::{Result, ShipperError};
use serde::{Deserialize, Serialize};

/// Result of a successful cost call.
#[derive(Debug, Clone)]
pub struct CostQuote {
    pub prepared: PreparedCost,
    pub rates: serde_json::Value,
    pub response: RawResponse,
}

impl CostQuote {
    pub fn resolved_weight(&self) -> Option<f64> {
        self.prepared.request.resolved_weight()
    }
}

/// `domesticRates` query, sent with the remote API's short parameter names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticRatesQuery {
    pub origin: String,
    pub destination: String,
    /// kilograms
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub item_value: f64,
    pub rate_type: u8,
}

impl DomesticRatesQuery {
    fn to_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        params.insert("o", self.origin.as_str());
        params.insert("d", self.destination.as_str());
        params.insert_number("wt", self.weight);
        params.insert_number("l", self.length);
        params.insert_number("w", self.width);
        params.insert_number("h", self.height);
        params.insert_number("v", self.item_value);
        params.insert("type", self.rate_type.to_string());
        params
    }
}

/// Shipping-rate client bound to one account tier.
///
/// The tier never changes after construction, so a client can be shared
/// across tasks without locking.
pub struct ShipperClient<T: Transport> {
    tier: AccountTier,
    transport: T,
}

impl<T: Transport> ShipperClient<T> {
    pub fn new(tier: AccountTier, transport: T) -> Self {
        Self { tier, transport }
    }

    pub fn tier(&self) -> AccountTier {
        self.tier
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn supported_couriers(&self) -> &'static [&'static str] {
        AccountPolicy::couriers_for(self.tier)
    }

    pub fn supported_waybill_couriers(&self) -> &'static [&'static str] {
        AccountPolicy::waybill_couriers_for(self.tier)
    }

    /// 執行完整的驗證流程，但不送出請求
    pub fn prepare_cost(
        &self,
        origin: &LocationInput,
        destination: &LocationInput,
        metrics: impl Into<MetricsInput>,
        courier: &str,
    ) -> Result<PreparedCost> {
        prepare_cost(self.tier, origin, destination, metrics.into(), courier)
    }

    pub async fn get_cost(
        &self,
        origin: &LocationInput,
        destination: &LocationInput,
        metrics: impl Into<MetricsInput>,
        courier: &str,
    ) -> Result<CostQuote> {
        let prepared = self.prepare_cost(origin, destination, metrics, courier)?;
        let response = RequestDispatcher::dispatch(&self.transport, &prepared).await?;

        let rates = response
            .rates()
            .cloned()
            .ok_or_else(|| ShipperError::MalformedResponse {
                path: prepared.path.as_str().to_string(),
                field: "data.rates".to_string(),
            })?;

        Ok(CostQuote {
            prepared,
            rates,
            response,
        })
    }

    pub async fn get_waybill(&self, waybill: &str, courier: &str) -> Result<RawResponse> {
        let courier = CourierCode::new(courier);

        if !AccountPolicy::is_waybill_supported(self.tier, &courier) {
            tracing::debug!("Waybill lookup for '{}' not available on {}", courier, self.tier);
            return Err(ShipperError::UnsupportedWaybillCourier {
                courier: courier.to_string(),
                tier: self.tier.to_string(),
            });
        }

        let mut params = RequestParams::new();
        params.insert("waybill", waybill);
        params.insert("courier", courier.as_str());
        self.transport.send("waybill", &params, HttpMethod::Post).await
    }

    pub async fn get_currency(&self) -> Result<RawResponse> {
        if self.tier == AccountTier::Starter {
            return Err(ValidationError::new(
                PolicyCode::UnsupportedDestination,
                "Unsupported Get Currency. Tipe akun starter tidak mendukung pengecekan currency.",
            )
            .into());
        }

        self.transport
            .send("currency", &RequestParams::new(), HttpMethod::Get)
            .await
    }

    pub async fn get_domestic_rates(&self, query: &DomesticRatesQuery) -> Result<serde_json::Value> {
        let path = "domesticRates";
        let response = self
            .transport
            .send(path, &query.to_params(), HttpMethod::Get)
            .await?;

        response
            .rates()
            .cloned()
            .ok_or_else(|| ShipperError::MalformedResponse {
                path: path.to_string(),
                field: "data.rates".to_string(),
            })
    }

    pub async fn list_countries(&self) -> Result<Vec<serde_json::Value>> {
        self.list("countries", RequestParams::new()).await
    }

    pub async fn list_provinces(&self) -> Result<Vec<serde_json::Value>> {
        self.list("provinces", RequestParams::new()).await
    }

    pub async fn list_merchants(&self) -> Result<Vec<serde_json::Value>> {
        self.list("merchants", RequestParams::new()).await
    }

    pub async fn list_cities(&self, province: &str) -> Result<Vec<serde_json::Value>> {
        self.list("cities", single_param("province", province)).await
    }

    pub async fn list_suburbs(&self, city: &str) -> Result<Vec<serde_json::Value>> {
        self.list("suburbs", single_param("city", city)).await
    }

    pub async fn list_areas(&self, suburb: &str) -> Result<Vec<serde_json::Value>> {
        self.list("areas", single_param("suburb", suburb)).await
    }

    async fn list(&self, path: &str, params: RequestParams) -> Result<Vec<serde_json::Value>> {
        let response = self.transport.send(path, &params, HttpMethod::Get).await?;

        let rows = response
            .rows()
            .cloned()
            .ok_or_else(|| ShipperError::MalformedResponse {
                path: path.to_string(),
                field: "data.rows".to_string(),
            })?;

        tracing::debug!("Fetched {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}

fn single_param(key: &str, value: &str) -> RequestParams {
    let mut params = RequestParams::new();
    params.insert(key, value);
    params
}

/// Location inference, weight resolution and the tier gate, in that order.
pub fn prepare_cost(
    tier: AccountTier,
    origin: &LocationInput,
    destination: &LocationInput,
    metrics: MetricsInput,
    courier: &str,
) -> Result<PreparedCost> {
    let mut request = CostRequest {
        origin: LocationResolver::origin(origin),
        destination: LocationResolver::destination(destination),
        courier: CourierCode::new(courier),
        metrics: WeightCalculator::resolve(metrics),
    };

    ValidationGate::check(tier, &mut request)?;

    match request.metrics.weight {
        Some(weight) if weight.is_finite() && weight > 0.0 => {}
        Some(weight) => {
            return Err(ShipperError::InvalidMetrics {
                reason: format!("Resolved weight must be positive, got {}", weight),
            })
        }
        None => {
            return Err(ShipperError::InvalidMetrics {
                reason: "Provide a weight or all of length, width and height".to_string(),
            })
        }
    }

    Ok(RequestDispatcher::prepare(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LocationKind, PackageMetrics};

    fn loc(key: &str, id: &str) -> LocationInput {
        LocationInput::new(key, id)
    }

    #[test]
    fn test_starter_subdistrict_destination_rejected() {
        let err = prepare_cost(
            AccountTier::Starter,
            &loc("city", "1"),
            &loc("subdistrict", "2"),
            PackageMetrics::with_weight(500.0).into(),
            "jne",
        )
        .unwrap_err();
        assert_eq!(err.policy_code(), Some(302));
    }

    #[test]
    fn test_pro_dimensions_only_succeeds() {
        let prepared = prepare_cost(
            AccountTier::Pro,
            &loc("city", "1"),
            &loc("city", "2"),
            PackageMetrics::with_dimensions(10.0, 10.0, 10.0).into(),
            "jne",
        )
        .unwrap();

        let weight = prepared.request.resolved_weight().unwrap();
        assert!((weight - 166.67).abs() < 0.01);
        assert_eq!(prepared.path.as_str(), "cost");
        assert_eq!(prepared.request.origin.kind, LocationKind::City);
    }

    #[test]
    fn test_dimension_rule_unreachable_after_resolution() {
        // Weight is always filled from a full dimension set before the gate
        // runs, so Starter never sees 304 here.
        let prepared = prepare_cost(
            AccountTier::Starter,
            &loc("city", "1"),
            &loc("city", "2"),
            PackageMetrics::with_dimensions(10.0, 10.0, 10.0).into(),
            "jne",
        )
        .unwrap();
        assert!(prepared.params.contains_key("length"));

        let err = prepare_cost(
            AccountTier::Basic,
            &loc("city", "1"),
            &loc("city", "2"),
            PackageMetrics::with_dimensions(100.0, 100.0, 100.0).into(),
            "jne",
        )
        .unwrap_err();
        assert_eq!(err.policy_code(), Some(305));
    }

    #[test]
    fn test_basic_never_sends_partial_dimensions() {
        let metrics = PackageMetrics {
            weight: Some(500.0),
            length: Some(50.0),
            ..Default::default()
        };
        let prepared = prepare_cost(
            AccountTier::Basic,
            &loc("city", "1"),
            &loc("city", "2"),
            metrics.into(),
            "jne",
        )
        .unwrap();

        assert_eq!(prepared.params.get("weight"), Some("500"));
        assert!(!prepared.params.contains_key("length"));
    }

    #[test]
    fn test_missing_weight_is_input_error() {
        let err = prepare_cost(
            AccountTier::Pro,
            &loc("city", "1"),
            &loc("city", "2"),
            PackageMetrics::default().into(),
            "jne",
        )
        .unwrap_err();
        assert!(matches!(err, ShipperError::InvalidMetrics { .. }));
        assert!(err.policy_code().is_none());

        let err = prepare_cost(
            AccountTier::Pro,
            &loc("city", "1"),
            &loc("city", "2"),
            MetricsInput::Weight(0.0),
            "jne",
        )
        .unwrap_err();
        assert!(matches!(err, ShipperError::InvalidMetrics { .. }));
    }

    #[test]
    fn test_policy_checked_before_missing_weight() {
        let err = prepare_cost(
            AccountTier::Starter,
            &loc("city", "1"),
            &loc("country", "108"),
            PackageMetrics::default().into(),
            "jne",
        )
        .unwrap_err();
        assert_eq!(err.policy_code(), Some(301));
    }

    #[test]
    fn test_courier_is_normalized() {
        let prepared = prepare_cost(
            AccountTier::Starter,
            &loc("City", "1"),
            &loc("CITY", "2"),
            MetricsInput::Weight(1000.0),
            "JNE",
        )
        .unwrap();
        assert_eq!(prepared.params.get("courier"), Some("jne"));
        assert_eq!(prepared.params.get("weight"), Some("1000"));
    }

    #[test]
    fn test_domestic_rates_params() {
        let query = DomesticRatesQuery {
            origin: "4567".to_string(),
            destination: "4342".to_string(),
            weight: 1.5,
            length: 10.0,
            width: 10.0,
            height: 10.0,
            item_value: 1000.0,
            rate_type: 2,
        };
        let params = query.to_params();
        assert_eq!(params.get("o"), Some("4567"));
        assert_eq!(params.get("wt"), Some("1.5"));
        assert_eq!(params.get("v"), Some("1000"));
        assert_eq!(params.get("type"), Some("2"));
    }
}
