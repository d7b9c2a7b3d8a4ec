mod common;

use axum_test::TestServer;
use digest_shortener::api::routes::routes;

#[tokio::test]
async fn test_health_endpoint_success() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "cd69b8", "https://example.com/a").await;

    let app = routes().with_state(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["storage"]["reachable"], true);
    assert_eq!(json["storage"]["short_links"], 1);
}

#[tokio::test]
async fn test_health_endpoint_degraded_when_database_closed() {
    let pool = common::test_pool().await;
    let app = routes().with_state(common::create_test_state(pool.clone()));
    let server = TestServer::new(app).unwrap();

    pool.close().await;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["storage"]["reachable"], false);
    assert!(json["storage"]["error"].is_string());
    assert!(json.get("version").is_some());
}
