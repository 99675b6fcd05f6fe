//! HTTP surface tests: health endpoint and CORS policy.

use std::time::Duration;

use compliance_server::http;
use compliance_server::lifecycle::ShutdownController;

mod common;

#[tokio::test]
async fn health_answers_independently_of_database_state() {
    // Database deliberately unreachable; /health must not care.
    let config = common::test_config(28911, 1);
    let state = common::test_state(&config);
    let app = http::build_app(state, &[&common::PingGroup]).expect("router builds");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:28911")
        .await
        .expect("test port free");

    let shutdown = ShutdownController::new();
    let server = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            http::serve(listener, app, shutdown, Duration::from_secs(5)).await
        })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;

    let client = common::http_client();
    let res = client
        .get("http://127.0.0.1:28911/health")
        .send()
        .await
        .expect("health endpoint reachable");
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.expect("health body is JSON");
    assert_eq!(body["status"], "ok");

    let timestamp = body["timestamp"].as_str().expect("timestamp present");
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "timestamp must be an ISO-8601 instant: {timestamp}"
    );

    shutdown.trigger();
    let _ = server.await;
}

#[tokio::test]
async fn responses_carry_a_generated_request_id() {
    let config = common::test_config(28913, 1);
    let state = common::test_state(&config);
    let app = http::build_app(state, &[&common::PingGroup]).expect("router builds");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:28913")
        .await
        .expect("test port free");

    let shutdown = ShutdownController::new();
    let server = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            http::serve(listener, app, shutdown, Duration::from_secs(5)).await
        })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;

    let client = common::http_client();

    // A client that sends no id must still get one back.
    let res = client
        .get("http://127.0.0.1:28913/health")
        .send()
        .await
        .expect("server reachable");
    let id = res
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("response must carry a generated x-request-id");
    assert!(uuid::Uuid::parse_str(id).is_ok(), "request id is a UUID: {id}");

    // A caller-supplied id is propagated untouched.
    let res = client
        .get("http://127.0.0.1:28913/health")
        .header("x-request-id", "caller-chosen-id")
        .send()
        .await
        .expect("server reachable");
    assert_eq!(
        res.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("caller-chosen-id")
    );

    shutdown.trigger();
    let _ = server.await;
}

#[tokio::test]
async fn cors_allows_exactly_the_configured_origin() {
    let config = common::test_config(28912, 1);
    let origin = config.cors.origin.clone();
    let state = common::test_state(&config);
    let app = http::build_app(state, &[&common::PingGroup]).expect("router builds");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:28912")
        .await
        .expect("test port free");

    let shutdown = ShutdownController::new();
    let server = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            http::serve(listener, app, shutdown, Duration::from_secs(5)).await
        })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;

    let client = common::http_client();

    // Request from the configured origin: allowed, with credentials.
    let res = client
        .get("http://127.0.0.1:28912/health")
        .header("Origin", &origin)
        .send()
        .await
        .expect("server reachable");
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(origin.as_str())
    );
    assert_eq!(
        res.headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );

    // Request from another origin: the allow header still names the
    // configured origin, never the caller's. The mismatch is enforced by
    // the browser, not suppressed by the server.
    let res = client
        .get("http://127.0.0.1:28912/health")
        .header("Origin", "https://evil.example")
        .send()
        .await
        .expect("server reachable");
    let allowed = res
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allowed, Some(origin.as_str()));
    assert_ne!(allowed, Some("https://evil.example"));

    shutdown.trigger();
    let _ = server.await;
}
