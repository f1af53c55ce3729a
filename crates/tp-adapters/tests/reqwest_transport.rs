use anyhow::Result;
use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use http::{Method, Request};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tp_adapters::{ReqwestTransport, Transport};

async fn echo(headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let received: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({
        "success": true,
        "content_type": content_type,
        "user_agent": user_agent,
        "received": received,
    }))
}

async fn spawn_collector() -> Result<SocketAddr> {
    let app = Router::new()
        .route("/api/events/track", post(echo))
        .route(
            "/api/events/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn json_post(url: String, body: Value) -> Result<Request<Bytes>> {
    Ok(Request::builder()
        .method(Method::POST)
        .uri(url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Bytes::from(serde_json::to_vec(&body)?))?)
}

#[tokio::test]
async fn test_posts_json_and_returns_body() -> Result<()> {
    let addr = spawn_collector().await?;
    let transport = ReqwestTransport::new();

    let request = json_post(
        format!("http://{}/api/events/track", addr),
        json!({"pixel_id": "px_demo_001", "event_type": "click"}),
    )?;
    let response = transport.send(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(response.body())?;
    assert_eq!(body["content_type"], "application/json");
    assert_eq!(body["received"]["pixel_id"], "px_demo_001");
    Ok(())
}

#[tokio::test]
async fn test_custom_client_is_used() -> Result<()> {
    let addr = spawn_collector().await?;
    let client = reqwest::Client::builder()
        .user_agent("tp-pixel/0.1")
        .build()?;
    let transport = ReqwestTransport::with_client(client);

    let request = json_post(format!("http://{}/api/events/track", addr), json!({}))?;
    let response = transport.send(request).await?;

    let body: Value = serde_json::from_slice(response.body())?;
    assert_eq!(body["user_agent"], "tp-pixel/0.1");
    Ok(())
}

#[tokio::test]
async fn test_error_status_is_not_a_transport_error() -> Result<()> {
    let addr = spawn_collector().await?;
    let transport = ReqwestTransport::new();

    let request = json_post(format!("http://{}/api/events/broken", addr), json!({}))?;
    let response = transport.send(request).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body().as_ref(), b"boom");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_collector_is_an_error() -> Result<()> {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let transport = ReqwestTransport::new();
    let request = json_post(format!("http://{}/api/events/track", addr), json!({}))?;
    assert!(transport.send(request).await.is_err());
    Ok(())
}
