#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::AccountTier;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

/// API 帳戶設定：金鑰、帳戶等級與連線參數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default = "default_account_type")]
    pub account_type: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_account_type() -> String {
    AccountTier::Starter.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, account_type: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            account_type: account_type.into(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    /// Parses the account type. Unknown values fail here, before any client
    /// is built.
    pub fn account_tier(&self) -> Result<AccountTier> {
        self.account_type.parse()
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        self.account_tier()?;
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}
