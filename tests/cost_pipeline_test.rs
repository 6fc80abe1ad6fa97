use async_trait::async_trait;
use shipper_client::{
    AccountTier, HttpMethod, LocationInput, MetricsInput, PackageMetrics, RawResponse,
    RequestParams, Result, ShipperClient, ShipperError, Transport,
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct SentRequest {
    path: String,
    params: RequestParams,
    method: HttpMethod,
}

/// 記錄所有送出請求的傳輸層
#[derive(Clone)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentRequest>>>,
    body: serde_json::Value,
    fail_with_status: Option<u16>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            body: serde_json::json!({
                "status": "success",
                "data": {
                    "rows": [{"id": 1, "name": "Jakarta"}],
                    "rates": {"logistic": {"regular": [{"name": "JNE", "finalRate": 9000}]}}
                }
            }),
            fail_with_status: None,
        }
    }

    fn with_body(body: serde_json::Value) -> Self {
        Self {
            body,
            ..Self::new()
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::new()
        }
    }

    async fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        path: &str,
        params: &RequestParams,
        method: HttpMethod,
    ) -> Result<RawResponse> {
        self.sent.lock().await.push(SentRequest {
            path: path.to_string(),
            params: params.clone(),
            method,
        });

        if let Some(status) = self.fail_with_status {
            return Err(ShipperError::HttpStatus {
                status,
                body: "upstream error".to_string(),
            });
        }
        Ok(RawResponse::new(200, self.body.clone()))
    }
}

fn client(tier: AccountTier) -> (ShipperClient<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new();
    (ShipperClient::new(tier, transport.clone()), transport)
}

fn loc(key: &str, id: &str) -> LocationInput {
    LocationInput::new(key, id)
}

#[tokio::test]
async fn test_starter_subdistrict_rejected_without_dispatch() {
    let (client, transport) = client(AccountTier::Starter);

    let err = client
        .get_cost(
            &loc("city", "1"),
            &loc("subdistrict", "2"),
            PackageMetrics::with_weight(500.0),
            "jne",
        )
        .await
        .unwrap_err();

    assert_eq!(err.policy_code(), Some(302));
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_pro_dimensions_only_end_to_end() {
    let (client, transport) = client(AccountTier::Pro);

    let quote = client
        .get_cost(
            &loc("city", "1"),
            &loc("city", "2"),
            PackageMetrics::with_dimensions(10.0, 10.0, 10.0),
            "jne",
        )
        .await
        .unwrap();

    let weight = quote.resolved_weight().unwrap();
    assert!((weight - 166.67).abs() < 0.01);
    assert!(quote.rates.get("logistic").is_some());

    let sent = transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "cost");
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].params.get("originType"), Some("city"));
    assert_eq!(sent[0].params.get("destinationType"), Some("city"));
    assert_eq!(sent[0].params.get("origin"), Some("1"));
    assert_eq!(sent[0].params.get("destination"), Some("2"));
    assert_eq!(sent[0].params.get("length"), Some("10"));
}

#[tokio::test]
async fn test_international_destination_uses_international_path() {
    let (client, transport) = client(AccountTier::Basic);

    client
        .get_cost(&loc("city", "152"), &loc("country", "108"), 1000.0, "pos")
        .await
        .unwrap();

    let sent = transport.sent().await;
    assert_eq!(sent[0].path, "internationalCost");
    assert_eq!(sent[0].params.get("destinationType"), Some("country"));
    assert_eq!(sent[0].params.get("weight"), Some("1000"));
}

#[tokio::test]
async fn test_starter_international_rejected() {
    let (client, transport) = client(AccountTier::Starter);

    let err = client
        .get_cost(&loc("city", "152"), &loc("country", "108"), 1000.0, "jne")
        .await
        .unwrap_err();

    assert_eq!(err.policy_code(), Some(301));
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_basic_strips_dimensions_from_outgoing_params() {
    let (client, transport) = client(AccountTier::Basic);

    let metrics = PackageMetrics {
        weight: Some(10_000.0),
        length: Some(20.0),
        width: Some(20.0),
        height: Some(20.0),
        diameter: None,
    };
    client
        .get_cost(&loc("city", "1"), &loc("city", "2"), metrics, "rpx")
        .await
        .unwrap();

    let sent = transport.sent().await;
    assert_eq!(sent[0].params.get("weight"), Some("10000"));
    assert!(!sent[0].params.contains_key("length"));
    assert!(!sent[0].params.contains_key("width"));
    assert!(!sent[0].params.contains_key("height"));
}

#[tokio::test]
async fn test_basic_overweight_rejected_regardless_of_dimensions() {
    let (client, transport) = client(AccountTier::Basic);

    for metrics in [
        PackageMetrics::with_weight(31_000.0),
        PackageMetrics {
            weight: Some(31_000.0),
            length: Some(10.0),
            width: Some(10.0),
            height: Some(10.0),
            diameter: None,
        },
    ] {
        let err = client
            .get_cost(&loc("city", "1"), &loc("city", "2"), metrics, "jne")
            .await
            .unwrap_err();
        assert_eq!(err.policy_code(), Some(305));
    }
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_unknown_location_keys_fall_back_to_subdistrict() {
    let (client, transport) = client(AccountTier::Pro);

    client
        .get_cost(&loc("province", "6"), &loc("foo", "7"), 250.0, "sicepat")
        .await
        .unwrap();

    let sent = transport.sent().await;
    assert_eq!(sent[0].params.get("originType"), Some("subdistrict"));
    assert_eq!(sent[0].params.get("destinationType"), Some("subdistrict"));
}

#[tokio::test]
async fn test_unsupported_courier_per_tier() {
    let (starter, _) = client(AccountTier::Starter);
    let err = starter
        .get_cost(&loc("city", "1"), &loc("city", "2"), 500.0, "pcp")
        .await
        .unwrap_err();
    assert_eq!(err.policy_code(), Some(303));

    let (basic, basic_transport) = client(AccountTier::Basic);
    basic
        .get_cost(&loc("city", "1"), &loc("city", "2"), 500.0, "pcp")
        .await
        .unwrap();
    assert_eq!(basic_transport.sent().await.len(), 1);
}

#[tokio::test]
async fn test_transport_failure_has_no_policy_code() {
    let transport = RecordingTransport::failing(502);
    let client = ShipperClient::new(AccountTier::Pro, transport.clone());

    let err = client
        .get_cost(&loc("city", "1"), &loc("city", "2"), MetricsInput::Weight(100.0), "jne")
        .await
        .unwrap_err();

    assert!(matches!(err, ShipperError::HttpStatus { status: 502, .. }));
    assert!(err.policy_code().is_none());
    assert_eq!(transport.sent().await.len(), 1);
}

#[tokio::test]
async fn test_missing_rates_is_malformed_response() {
    let transport = RecordingTransport::with_body(serde_json::json!({"data": {}}));
    let client = ShipperClient::new(AccountTier::Pro, transport);

    let err = client
        .get_cost(&loc("city", "1"), &loc("city", "2"), 100.0, "jne")
        .await
        .unwrap_err();
    assert!(matches!(err, ShipperError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_waybill_gated_by_waybill_couriers() {
    let (starter, starter_transport) = client(AccountTier::Starter);
    let err = starter.get_waybill("8825112045716759", "jne").await.unwrap_err();
    assert!(matches!(err, ShipperError::UnsupportedWaybillCourier { .. }));
    assert!(err.policy_code().is_none());
    assert!(starter_transport.sent().await.is_empty());

    let (basic, basic_transport) = client(AccountTier::Basic);
    assert!(basic.get_waybill("123", "tiki").await.is_err());
    basic.get_waybill("123", "JNE").await.unwrap();

    let sent = basic_transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "waybill");
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].params.get("waybill"), Some("123"));
    assert_eq!(sent[0].params.get("courier"), Some("jne"));
    assert_eq!(sent[0].params.len(), 2);
    assert!(!sent[0].params.contains_key("key"));
}

#[tokio::test]
async fn test_currency_requires_paid_tier() {
    let (starter, starter_transport) = client(AccountTier::Starter);
    let err = starter.get_currency().await.unwrap_err();
    assert_eq!(err.policy_code(), Some(301));
    assert!(starter_transport.sent().await.is_empty());

    let (pro, pro_transport) = client(AccountTier::Pro);
    pro.get_currency().await.unwrap();
    let sent = pro_transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "currency");
    assert_eq!(sent[0].method, HttpMethod::Get);
}

#[tokio::test]
async fn test_listing_passthroughs_send_once() {
    let (client, transport) = client(AccountTier::Starter);

    let rows = client.list_cities("9").await.unwrap();
    assert_eq!(rows.len(), 1);
    client.list_suburbs("152").await.unwrap();
    client.list_areas("1520").await.unwrap();
    client.list_countries().await.unwrap();

    let sent = transport.sent().await;
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[0].path, "cities");
    assert_eq!(sent[0].params.get("province"), Some("9"));
    assert_eq!(sent[1].params.get("city"), Some("152"));
    assert_eq!(sent[2].params.get("suburb"), Some("1520"));
    assert!(sent[3].params.is_empty());
    assert!(sent.iter().all(|r| r.method == HttpMethod::Get));
}

#[tokio::test]
async fn test_supported_couriers_follow_tier() {
    let (starter, _) = client(AccountTier::Starter);
    assert_eq!(starter.supported_couriers(), &["jne", "pos", "tiki"]);
    assert!(starter.supported_waybill_couriers().is_empty());

    let (pro, _) = client(AccountTier::Pro);
    assert_eq!(pro.supported_couriers().len(), 21);
    assert_eq!(pro.supported_waybill_couriers().len(), 12);
}

#[tokio::test]
async fn test_client_shared_across_tasks() {
    let (client, transport) = client(AccountTier::Pro);
    let client = Arc::new(client);

    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .get_cost(&loc("city", "1"), &loc("city", &i.to_string()), 100.0 * i as f64, "jne")
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(transport.sent().await.len(), 4);
}
