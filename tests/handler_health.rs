mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _storage) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert!(json.get("version").is_some());
}
