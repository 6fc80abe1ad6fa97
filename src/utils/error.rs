use crate::domain::model::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShipperError {
    #[error("Policy violation {0}")]
    Policy(ValidationError),

    #[error("Courier '{courier}' has no waybill tracking on the {tier} account")]
    UnsupportedWaybillCourier { courier: String, tier: String },

    #[error("Invalid package metrics: {reason}")]
    InvalidMetrics { reason: String },

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed API response from '{path}': missing {field}")]
    MalformedResponse { path: String, field: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 帳戶等級不支援的請求 (301-305)
    Policy,
    /// 連線、HTTP 狀態或回應格式錯誤
    Transport,
    /// 啟動時的設定錯誤
    Configuration,
    /// 呼叫端輸入錯誤
    Input,
}

impl ShipperError {
    /// Stable policy code, only present for tier-policy violations.
    pub fn policy_code(&self) -> Option<u16> {
        match self {
            ShipperError::Policy(violation) => Some(violation.code()),
            _ => None,
        }
    }

    pub fn is_policy_violation(&self) -> bool {
        matches!(self, ShipperError::Policy(_))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ShipperError::Policy(_) => ErrorCategory::Policy,
            ShipperError::UnsupportedWaybillCourier { .. } | ShipperError::InvalidMetrics { .. } => {
                ErrorCategory::Input
            }
            ShipperError::Http(_)
            | ShipperError::HttpStatus { .. }
            | ShipperError::Serialization(_)
            | ShipperError::MalformedResponse { .. } => ErrorCategory::Transport,
            ShipperError::InvalidUrl(_)
            | ShipperError::Io(_)
            | ShipperError::Config { .. }
            | ShipperError::InvalidConfigValue { .. }
            | ShipperError::MissingConfig { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Policy => "Upgrade the account type or adjust the request to fit the current tier",
            ErrorCategory::Transport => "Check network connectivity and the API base URL, then try again",
            ErrorCategory::Configuration => "Check the API key, account type and config file",
            ErrorCategory::Input => "Check the courier code and package metrics",
        }
    }
}

impl From<ValidationError> for ShipperError {
    fn from(violation: ValidationError) -> Self {
        ShipperError::Policy(violation)
    }
}

pub type Result<T> = std::result::Result<T, ShipperError>;
