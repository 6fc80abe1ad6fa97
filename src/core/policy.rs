//! Static capability tables, one row per account tier.

use crate::domain::model::{AccountTier, CourierCode};

pub const STANDARD_WEIGHT_CEILING: f64 = 30_000.0;

/// Every courier the remote API knows about, with its display name.
pub const COURIER_CATALOG: &[(&str, &str)] = &[
    ("jne", "Jalur Nugraha Ekakurir (JNE)"),
    ("pos", "POS Indonesia (POS)"),
    ("tiki", "Citra Van Titipan Kilat (TIKI)"),
    ("pcp", "Priority Cargo and Package (PCP)"),
    ("esl", "Eka Sari Lorena (ESL)"),
    ("rpx", "RPX Holding (RPX)"),
    ("pandu", "Pandu Logistics (PANDU)"),
    ("wahana", "Wahana Prestasi Logistik (WAHANA)"),
    ("sicepat", "SiCepat Express (SICEPAT)"),
    ("j&t", "J&T Express (J&T)"),
    ("pahala", "Pahala Kencana Express (PAHALA)"),
    ("cahaya", "Cahaya Logistik (CAHAYA)"),
    ("sap", "SAP Express (SAP)"),
    ("jet", "JET Express (JET)"),
    ("indah", "Indah Logistic (INDAH)"),
    ("slis", "Solusi Express (SLIS)"),
    ("expedito*", "Expedito*"),
    ("dse", "21 Express (DSE)"),
    ("first", "First Logistics (FIRST)"),
    ("ncs", "Nusantara Card Semesta (NCS)"),
    ("star", "Star Cargo (STAR)"),
];

const STARTER_COURIERS: &[&str] = &["jne", "pos", "tiki"];
const BASIC_COURIERS: &[&str] = &["jne", "pos", "tiki", "pcp", "esl", "rpx"];
const PRO_COURIERS: &[&str] = &[
    "jne", "pos", "tiki", "rpx", "esl", "pcp", "pandu", "wahana", "sicepat", "j&t", "pahala",
    "cahaya", "sap", "jet", "indah", "slis", "expedito*", "dse", "first", "ncs", "star",
];

const BASIC_WAYBILLS: &[&str] = &["jne"];
const PRO_WAYBILLS: &[&str] = &[
    "jne", "pos", "tiki", "pcp", "rpx", "wahana", "sicepat", "j&t", "sap", "jet", "dse", "first",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPolicy {
    pub couriers: &'static [&'static str],
    pub waybill_couriers: &'static [&'static str],
    pub allows_subdistrict: bool,
    pub allows_international: bool,
    pub allows_dimensional_pricing: bool,
    /// `None` means no ceiling.
    pub weight_ceiling: Option<f64>,
}

const STARTER: TierPolicy = TierPolicy {
    couriers: STARTER_COURIERS,
    waybill_couriers: &[],
    allows_subdistrict: false,
    allows_international: false,
    allows_dimensional_pricing: false,
    weight_ceiling: Some(STANDARD_WEIGHT_CEILING),
};

const BASIC: TierPolicy = TierPolicy {
    couriers: BASIC_COURIERS,
    waybill_couriers: BASIC_WAYBILLS,
    allows_subdistrict: false,
    allows_international: true,
    allows_dimensional_pricing: false,
    weight_ceiling: Some(STANDARD_WEIGHT_CEILING),
};

const PRO: TierPolicy = TierPolicy {
    couriers: PRO_COURIERS,
    waybill_couriers: PRO_WAYBILLS,
    allows_subdistrict: true,
    allows_international: true,
    allows_dimensional_pricing: true,
    weight_ceiling: None,
};

pub struct AccountPolicy;

impl AccountPolicy {
    pub fn for_tier(tier: AccountTier) -> &'static TierPolicy {
        match tier {
            AccountTier::Starter => &STARTER,
            AccountTier::Basic => &BASIC,
            AccountTier::Pro => &PRO,
        }
    }

    pub fn couriers_for(tier: AccountTier) -> &'static [&'static str] {
        Self::for_tier(tier).couriers
    }

    pub fn waybill_couriers_for(tier: AccountTier) -> &'static [&'static str] {
        Self::for_tier(tier).waybill_couriers
    }

    pub fn is_supported(tier: AccountTier, courier: &CourierCode) -> bool {
        Self::couriers_for(tier).contains(&courier.as_str())
    }

    pub fn is_waybill_supported(tier: AccountTier, courier: &CourierCode) -> bool {
        Self::waybill_couriers_for(tier).contains(&courier.as_str())
    }
}

pub fn courier_name(code: &str) -> Option<&'static str> {
    COURIER_CATALOG
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
