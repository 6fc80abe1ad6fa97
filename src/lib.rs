pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpTransport;
pub use config::{toml_config::TomlConfig, ClientConfig};
pub use core::client::{CostQuote, DomesticRatesQuery, ShipperClient};
pub use core::dispatcher::{CostPath, PreparedCost};
pub use domain::model::{
    AccountTier, CostRequest, CourierCode, LocationInput, LocationKind, LocationSpecifier,
    MetricsInput, PackageMetrics, PolicyCode, ValidationError,
};
pub use domain::ports::{HttpMethod, RawResponse, RequestParams, Transport};
pub use utils::error::{Result, ShipperError};
