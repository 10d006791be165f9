use crate::{
    ApiClient, DashboardConfig, DashboardError, DashboardUrl, StatCounter,
    sync::application::service::stats_sync_service::StatsSyncService,
};
use reqwest::StatusCode;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn create_test_client(server_url: &str) -> ApiClient {
    let base = DashboardUrl::new(&format!("{}/proxy.php", server_url)).unwrap();
    ApiClient::new(base, &DashboardConfig::default()).unwrap()
}

#[tokio::test]
async fn test_stats_singleton_list() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/proxy.php"))
        .and(query_param("type", "stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "active_total": "812",
            "peers_total": 15034,
            "earning_total": 640,
            "v2ray": 500,
            "wireguard": 312,
            "healthy": 790,
            "unhealthy": 22,
            "whitelisted": 700,
            "whitelist_pending": 80,
            "delisted": 32,
            "hosting": 600,
            "residential": 212
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stats = StatsSyncService::new().execute(&client).await.unwrap();
    assert_eq!(stats.counter(StatCounter::Active), 812);
    assert_eq!(stats.counter(StatCounter::Users), 15034);
    assert_eq!(stats.counter(StatCounter::Pending), 80);
    assert_eq!(stats.bar_widths().len(), 6);
}

#[tokio::test]
async fn test_stats_invalid_type_reply() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/proxy.php"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "Invalid type" })),
        )
        .mount(&mock_server)
        .await;

    let result = StatsSyncService::new().execute(&client).await;
    assert!(matches!(
        result,
        Err(DashboardError::Backend { status, .. }) if status == StatusCode::OK
    ));
}

#[tokio::test]
async fn test_stats_empty_list() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/proxy.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let result = StatsSyncService::new().execute(&client).await;
    assert!(matches!(result, Err(DashboardError::Payload(_))));
}
