//! Per-tier validation chain applied to a resolved cost request.
//!
//! Rules run in order and the first failing rule aborts the request. A rule
//! may also rewrite the request (Basic accounts drop dimensions under the
//! weight ceiling).

use crate::core::policy::{AccountPolicy, TierPolicy};
use crate::domain::model::{
    AccountTier, CostRequest, LocationKind, PolicyCode, ValidationError,
};
use crate::domain::ports::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRule {
    /// 301
    RejectInternational,
    /// 302
    RejectSubdistrict,
    /// 304: weight absent while a full dimension set is present.
    ///
    /// Weight resolution always fills the weight from a full dimension set,
    /// so this only fires on requests that skipped `WeightCalculator`.
    RejectDimensionOnly,
    /// 305
    RejectOverweight,
    StripDimensionsUnderCeiling,
    /// 303
    RejectUnsupportedCourier,
}

const STARTER_RULES: &[GateRule] = &[
    GateRule::RejectInternational,
    GateRule::RejectSubdistrict,
    GateRule::RejectDimensionOnly,
    GateRule::RejectOverweight,
    GateRule::RejectUnsupportedCourier,
];

const BASIC_RULES: &[GateRule] = &[
    GateRule::RejectSubdistrict,
    GateRule::RejectDimensionOnly,
    GateRule::RejectOverweight,
    GateRule::StripDimensionsUnderCeiling,
    GateRule::RejectUnsupportedCourier,
];

pub struct ValidationGate;

impl ValidationGate {
    pub fn rules_for(tier: AccountTier) -> &'static [GateRule] {
        match tier {
            AccountTier::Starter => STARTER_RULES,
            AccountTier::Basic => BASIC_RULES,
            AccountTier::Pro => &[],
        }
    }

    pub fn check(tier: AccountTier, request: &mut CostRequest) -> Result<(), ValidationError> {
        let policy = AccountPolicy::for_tier(tier);

        for rule in Self::rules_for(tier) {
            if let Err(violation) = apply_rule(*rule, tier, policy, request) {
                tracing::warn!(
                    "Rejected {} cost request for courier '{}': {}",
                    tier,
                    request.courier,
                    violation
                );
                return Err(violation);
            }
        }

        Ok(())
    }
}

fn apply_rule(
    rule: GateRule,
    tier: AccountTier,
    policy: &TierPolicy,
    request: &mut CostRequest,
) -> Result<(), ValidationError> {
    match rule {
        GateRule::RejectInternational => {
            if !policy.allows_international && request.destination.kind == LocationKind::Country {
                return Err(ValidationError::new(
                    PolicyCode::UnsupportedDestination,
                    format!(
                        "Unsupported International Destination. Tipe akun {} tidak mendukung pengecekan destinasi international.",
                        tier
                    ),
                ));
            }
        }
        GateRule::RejectSubdistrict => {
            let subdistrict = request.origin.kind == LocationKind::Subdistrict
                || request.destination.kind == LocationKind::Subdistrict;
            if !policy.allows_subdistrict && subdistrict {
                return Err(ValidationError::new(
                    PolicyCode::UnsupportedSubdistrict,
                    format!(
                        "Unsupported Subdistrict Origin-Destination. Tipe akun {} tidak mendukung pengecekan ongkos kirim sampai kecamatan.",
                        tier
                    ),
                ));
            }
        }
        GateRule::RejectDimensionOnly => {
            if !policy.allows_dimensional_pricing
                && request.metrics.weight.is_none()
                && request.metrics.has_dimensions()
            {
                return Err(ValidationError::new(
                    PolicyCode::UnsupportedDimension,
                    format!(
                        "Unsupported Dimension. Tipe akun {} tidak mendukung pengecekan biaya kirim berdasarkan dimensi.",
                        tier
                    ),
                ));
            }
        }
        GateRule::RejectOverweight => {
            if let (Some(ceiling), Some(weight)) = (policy.weight_ceiling, request.metrics.weight) {
                if weight > ceiling {
                    return Err(ValidationError::new(
                        PolicyCode::UnsupportedWeight,
                        format!(
                            "Unsupported Weight. Tipe akun {} tidak mendukung pengecekan biaya kirim dengan berat lebih dari {} gram ({}kg).",
                            tier,
                            format_number(ceiling),
                            format_number(ceiling / 1000.0)
                        ),
                    ));
                }
            }
        }
        GateRule::StripDimensionsUnderCeiling => {
            if let (Some(ceiling), Some(weight)) = (policy.weight_ceiling, request.metrics.weight) {
                let any_dimension = request.metrics.length.is_some()
                    || request.metrics.width.is_some()
                    || request.metrics.height.is_some();
                if weight < ceiling && any_dimension {
                    tracing::debug!("Dropping dimensions for {} account ({}g)", tier, weight);
                    request.metrics.strip_dimensions();
                }
            }
        }
        GateRule::RejectUnsupportedCourier => {
            if !AccountPolicy::is_supported(tier, &request.courier) {
                return Err(ValidationError::new(
                    PolicyCode::UnsupportedCourier,
                    format!(
                        "Unsupported Courier. Tipe akun {} tidak mendukung pengecekan biaya kirim dengan kurir {}.",
                        tier,
                        request.courier.display_name()
                    ),
                ));
            }
        }
    }

    Ok(())
}
