pub mod client;
pub mod dispatcher;
pub mod gate;
pub mod location;
pub mod policy;
pub mod weight;

pub use crate::domain::model::{
    AccountTier, CostRequest, CourierCode, LocationInput, LocationKind, LocationSpecifier,
    MetricsInput, PackageMetrics, PolicyCode, ValidationError,
};
pub use crate::domain::ports::{HttpMethod, RawResponse, RequestParams, Transport};
pub use crate::utils::error::Result;
