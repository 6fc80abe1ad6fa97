use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::core::client::DomesticRatesQuery;
use crate::domain::model::{LocationInput, PackageMetrics};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "shipper")]
#[command(about = "Shipping-rate lookups across multiple couriers")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "SHIPPER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = "SHIPPER_ACCOUNT_TYPE", help = "starter, basic or pro")]
    pub account_type: Option<String>,

    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate shipping cost, e.g. --origin city=152 --destination subdistrict=2103
    Cost {
        #[arg(long)]
        origin: LocationInput,
        #[arg(long)]
        destination: LocationInput,
        #[arg(long)]
        courier: String,
        #[arg(long, help = "Weight in grams")]
        weight: Option<f64>,
        #[arg(long)]
        length: Option<f64>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        diameter: Option<f64>,
        #[arg(long, help = "Validate and print the request without sending it")]
        dry_run: bool,
    },
    /// Track a waybill
    Waybill {
        id: String,
        #[arg(long)]
        courier: String,
    },
    /// Currency rates (basic and pro accounts)
    Currency,
    /// Couriers available to the account
    Couriers,
    Countries,
    Provinces,
    Cities {
        province: String,
    },
    Suburbs {
        city: String,
    },
    Areas {
        suburb: String,
    },
    Merchants,
    /// Domestic rates by area id
    Rates {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long, help = "Weight in kilograms")]
        weight: f64,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long, help = "Declared item value")]
        value: f64,
        #[arg(long, default_value = "1")]
        rate_type: u8,
    },
}

/// 日誌輸出設定，命令列旗標與設定檔取聯集
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub verbose: bool,
    pub json: bool,
}

impl CliConfig {
    /// 讀取 `--config` 指定的設定檔 (若有)
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate_logging()?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    pub fn log_settings(&self, file: Option<&TomlConfig>) -> LogSettings {
        LogSettings {
            verbose: self.verbose || file.map(TomlConfig::verbose).unwrap_or(false),
            json: self.json_logs || file.map(TomlConfig::json_logs).unwrap_or(false),
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let file = self.load_file()?;
        self.client_config_with(file.as_ref())
    }

    /// 合併設定檔與命令列參數，命令列優先
    pub fn client_config_with(&self, file: Option<&TomlConfig>) -> Result<ClientConfig> {
        let mut config = match file {
            Some(file) => file.shipper.clone(),
            None => {
                let api_key = validate_required_field("api_key", &self.api_key)?;
                ClientConfig::new(api_key.clone(), "starter")
            }
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(account_type) = &self.account_type {
            config.account_type = account_type.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Command {
    pub fn package_metrics(&self) -> Option<PackageMetrics> {
        match self {
            Command::Cost {
                weight,
                length,
                width,
                height,
                diameter,
                ..
            } => Some(PackageMetrics {
                weight: *weight,
                length: *length,
                width: *width,
                height: *height,
                diameter: *diameter,
            }),
            _ => None,
        }
    }

    pub fn rates_query(&self) -> Option<DomesticRatesQuery> {
        match self {
            Command::Rates {
                origin,
                destination,
                weight,
                length,
                width,
                height,
                value,
                rate_type,
            } => Some(DomesticRatesQuery {
                origin: origin.clone(),
                destination: destination.clone(),
                weight: *weight,
                length: *length,
                width: *width,
                height: *height,
                item_value: *value,
                rate_type: *rate_type,
            }),
            _ => None,
        }
    }
}
