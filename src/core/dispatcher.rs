use crate::domain::model::{CostRequest, LocationKind};
use crate::domain::ports::{HttpMethod, RawResponse, RequestParams, Transport};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostPath {
    Domestic,
    International,
}

impl CostPath {
    pub fn for_request(request: &CostRequest) -> Self {
        if request.destination.kind == LocationKind::Country {
            CostPath::International
        } else {
            CostPath::Domestic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CostPath::Domestic => "cost",
            CostPath::International => "internationalCost",
        }
    }
}

/// A validated cost request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCost {
    pub request: CostRequest,
    pub path: CostPath,
    pub params: RequestParams,
}

pub struct RequestDispatcher;

impl RequestDispatcher {
    pub fn prepare(request: CostRequest) -> PreparedCost {
        let path = CostPath::for_request(&request);
        let params = Self::cost_params(&request);
        PreparedCost {
            request,
            path,
            params,
        }
    }

    /// 組合送出的參數：快遞、起訖類型與代碼，以及剩餘的包裹規格
    pub fn cost_params(request: &CostRequest) -> RequestParams {
        let mut params = RequestParams::new();
        params.insert("courier", request.courier.as_str());
        params.insert("originType", request.origin.kind.as_str());
        params.insert("destinationType", request.destination.kind.as_str());

        let metrics = &request.metrics;
        let fields = [
            ("weight", metrics.weight),
            ("length", metrics.length),
            ("width", metrics.width),
            ("height", metrics.height),
            ("diameter", metrics.diameter),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                params.insert_number(key, value);
            }
        }

        params.insert("origin", request.origin.id.as_str());
        params.insert("destination", request.destination.id.as_str());
        params
    }

    pub async fn dispatch(transport: &dyn Transport, prepared: &PreparedCost) -> Result<RawResponse> {
        tracing::debug!(
            "Dispatching {} request with {} params",
            prepared.path.as_str(),
            prepared.params.len()
        );
        transport
            .send(prepared.path.as_str(), &prepared.params, HttpMethod::Post)
            .await
    }
}
