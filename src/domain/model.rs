use crate::utils::error::ShipperError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 訂閱帳戶等級，決定套用哪一列政策表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTier {
    Starter,
    Basic,
    Pro,
}

impl AccountTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountTier::Starter => "starter",
            AccountTier::Basic => "basic",
            AccountTier::Pro => "pro",
        }
    }
}

impl fmt::Display for AccountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountTier {
    type Err = ShipperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starter" => Ok(AccountTier::Starter),
            "basic" => Ok(AccountTier::Basic),
            "pro" => Ok(AccountTier::Pro),
            _ => Err(ShipperError::InvalidConfigValue {
                field: "account_type".to_string(),
                value: s.to_string(),
                reason: "Account type must be one of: starter, basic, pro".to_string(),
            }),
        }
    }
}

/// 快遞代碼，一律轉為小寫
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourierCode(String);

impl CourierCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable carrier name from the catalog, or the upper-cased code
    /// when the courier is unknown.
    pub fn display_name(&self) -> String {
        crate::core::policy::courier_name(&self.0)
            .map(str::to_string)
            .unwrap_or_else(|| self.0.to_uppercase())
    }
}

impl fmt::Display for CourierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourierCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    City,
    Subdistrict,
    Country,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::City => "city",
            LocationKind::Subdistrict => "subdistrict",
            LocationKind::Country => "country",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 呼叫端提供的單一 key/value 位置描述，例如 `city=1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInput {
    pub key: String,
    pub id: String,
}

impl LocationInput {
    pub fn new(key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id: id.into(),
        }
    }
}

impl FromStr for LocationInput {
    type Err = ShipperError;

    /// Accepts `key=id` or `key:id`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, id) = s
            .split_once('=')
            .or_else(|| s.split_once(':'))
            .ok_or_else(|| ShipperError::InvalidConfigValue {
                field: "location".to_string(),
                value: s.to_string(),
                reason: "Expected <kind>=<id>, e.g. city=152".to_string(),
            })?;

        let (key, id) = (key.trim(), id.trim());
        if key.is_empty() || id.is_empty() {
            return Err(ShipperError::InvalidConfigValue {
                field: "location".to_string(),
                value: s.to_string(),
                reason: "Both kind and id must be non-empty".to_string(),
            });
        }

        Ok(Self::new(key, id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpecifier {
    pub kind: LocationKind,
    pub id: String,
}

/// 包裹規格：重量 (公克) 與尺寸 (公分)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageMetrics {
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub diameter: Option<f64>,
}

impl PackageMetrics {
    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn with_dimensions(length: f64, width: f64, height: f64) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Returns `(length, width, height)` only when all three are present.
    pub fn dimensions(&self) -> Option<(f64, f64, f64)> {
        match (self.length, self.width, self.height) {
            (Some(l), Some(w), Some(h)) => Some((l, w, h)),
            _ => None,
        }
    }

    pub fn has_dimensions(&self) -> bool {
        self.dimensions().is_some()
    }

    pub fn strip_dimensions(&mut self) {
        self.length = None;
        self.width = None;
        self.height = None;
    }
}

/// 重量輸入：完整規格或單一數值 (視為重量)
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsInput {
    Weight(f64),
    Metrics(PackageMetrics),
}

impl From<f64> for MetricsInput {
    fn from(weight: f64) -> Self {
        MetricsInput::Weight(weight)
    }
}

impl From<u32> for MetricsInput {
    fn from(weight: u32) -> Self {
        MetricsInput::Weight(f64::from(weight))
    }
}

impl From<PackageMetrics> for MetricsInput {
    fn from(metrics: PackageMetrics) -> Self {
        MetricsInput::Metrics(metrics)
    }
}

/// A cost query after location and weight resolution. `metrics.weight`
/// holds the resolved billable weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRequest {
    pub origin: LocationSpecifier,
    pub destination: LocationSpecifier,
    pub courier: CourierCode,
    pub metrics: PackageMetrics,
}

impl CostRequest {
    pub fn resolved_weight(&self) -> Option<f64> {
        self.metrics.weight
    }
}

/// Stable error codes returned for tier-policy violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyCode {
    UnsupportedDestination,
    UnsupportedSubdistrict,
    UnsupportedCourier,
    UnsupportedDimension,
    UnsupportedWeight,
}

impl PolicyCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            PolicyCode::UnsupportedDestination => 301,
            PolicyCode::UnsupportedSubdistrict => 302,
            PolicyCode::UnsupportedCourier => 303,
            PolicyCode::UnsupportedDimension => 304,
            PolicyCode::UnsupportedWeight => 305,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: PolicyCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: PolicyCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code.as_u16()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message)
    }
}

impl std::error::Error for ValidationError {}
