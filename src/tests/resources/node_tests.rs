use crate::{
    ApiClient, BadgeStyle, DashboardConfig, DashboardUrl, NodeTimestamp, SignalTier, Tone,
    TriState,
    presentation::derived_fields::DisplayRow,
    sync::application::service::node_sync_service::NodeSyncService,
};
use chrono::{TimeZone, Utc};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn create_test_client(server_url: &str) -> ApiClient {
    let base = DashboardUrl::new(&format!("{}/proxy.php", server_url)).unwrap();
    ApiClient::new(base, &DashboardConfig::default()).unwrap()
}

#[tokio::test]
async fn test_node_list_success() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/proxy.php"))
        .and(query_param("type", "data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "address": "sentnode1qqq9k4lq5hfcm8yhhcy3p3kp0x2kx3zpgvamy",
                "moniker": "frankfurt-01",
                "peers": 17,
                "uplink": 2_500_000,
                "country": "Germany",
                "city": "Frankfurt",
                "service_type": "wireguard",
                "ip_port": "203.0.113.7:8585",
                "last_checked": "2024-06-01 11:58:00",
                "failed_check": "2024-06-01 11:59:30",
                "is_earning": 1,
                "is_healthy": 0,
                "is_whitelisted": null,
                "is_residential": 1
            },
            {
                "address": "sentnode1zzz",
                "peers": "3",
                "uplink": "150000",
                "service_type": null
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = NodeSyncService::new().execute(&client).await.unwrap();
    assert_eq!(records.len(), 2);

    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let first = DisplayRow::of(&records[0], now);
    assert_eq!(first.address.short_xs, "sentnode...vamy");
    assert_eq!(first.address.short_sm, "sentnode1qqq...pgvamy");
    assert_eq!(first.moniker, "frankfurt-01");
    assert!(first.peers.active);
    assert_eq!(first.location, "Germany • Frankfurt");
    assert_eq!(first.protocol.label, "WireGuard");
    assert_eq!(first.protocol.style, BadgeStyle::WireGuard);
    assert!(first.activity.failed);
    assert_eq!(first.activity.label, "30s ago");
    assert_eq!(
        first.activity.timestamp,
        Some(NodeTimestamp::text("2024-06-01 11:59:30"))
    );
    assert_eq!(first.activity.link.as_deref(), Some("http://203.0.113.7:8585"));
    assert_eq!(first.status.earning.title, "Earning");
    assert_eq!(first.status.health.title, "Unhealthy");
    assert_eq!(first.status.whitelist.title, "Pending");
    assert_eq!(first.status.signal.tone, Tone::Positive);
    assert_eq!(records[0].is_residential, TriState::True);

    let second = DisplayRow::of(&records[1], now);
    assert_eq!(second.peers.count, 3);
    assert_eq!(second.moniker, "—");
    assert_eq!(second.location, "— • —");
    assert_eq!(second.protocol.label, "null");
    assert_eq!(second.activity.link, None);
    assert_eq!(second.status.earning.title, "Not Earning");
    assert_eq!(second.status.signal.title, "Uplink: 150000");
    assert_eq!(SignalTier::of(&records[1].uplink), SignalTier::Medium);
}

#[tokio::test]
async fn test_node_list_backend_failure() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/proxy.php"))
        .and(query_param("type", "data"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "Failed to fetch data" })),
        )
        .mount(&mock_server)
        .await;

    let result = NodeSyncService::new().execute(&client).await;
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to fetch data")
    );
}

#[tokio::test]
async fn test_node_list_skips_malformed_entries() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/proxy.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "address": "sentnode1a" },
            { "moniker": "no address" },
            42
        ])))
        .mount(&mock_server)
        .await;

    let records = NodeSyncService::new().execute(&client).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, "sentnode1a");
}
