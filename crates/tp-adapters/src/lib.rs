use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http::{header, Request, Response, StatusCode};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

pub mod environment;
pub mod http_client;

pub use environment::{EnvironmentReader, ReadyState, StaticEnvironment};
pub use http_client::ReqwestTransport;

/// Trait for one-shot HTTP delivery to the collector
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` once. `Err` means no response arrived at all; any
    /// status, including errors, is returned as `Ok`.
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>>;
}

/// A request captured by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: http::Method,
    pub url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Canned behaviour for a mocked endpoint
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond { status: StatusCode, body: Bytes },
    Fail(String),
}

impl MockReply {
    pub fn ok_json(body: &'static str) -> Self {
        MockReply::Respond {
            status: StatusCode::OK,
            body: Bytes::from_static(body.as_bytes()),
        }
    }
}

impl Default for MockReply {
    fn default() -> Self {
        MockReply::ok_json("{\"mock\":true}")
    }
}

/// Mock implementation for testing: records every request, replies from a table
#[derive(Default)]
pub struct MockTransport {
    default_reply: MockReply,
    replies: HashMap<String, MockReply>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply used for URLs without a specific entry.
    pub fn with_default_reply(mut self, reply: MockReply) -> Self {
        self.default_reply = reply;
        self
    }

    pub fn with_reply(mut self, url: impl Into<String>, reply: MockReply) -> Self {
        self.replies.insert(url.into(), reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.url == url)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let url = request.uri().to_string();
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.requests.lock().push(RecordedRequest {
            method: request.method().clone(),
            url: url.clone(),
            content_type,
            body: request.into_body(),
        });

        match self.replies.get(&url).unwrap_or(&self.default_reply) {
            MockReply::Respond { status, body } => {
                let mut response = Response::new(body.clone());
                *response.status_mut() = *status;
                Ok(response)
            }
            MockReply::Fail(reason) => Err(anyhow!("{}", reason)),
        }
    }
}

/// Smart constructor for mock implementation
pub fn mock_transport() -> Arc<MockTransport> {
    Arc::new(MockTransport::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn post(url: &str, body: &'static str) -> Request<Bytes> {
        Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_mock_records_and_replies() -> Result<()> {
        let transport = mock_transport();
        let response = transport.send(post("http://collector.test/track", "{}")).await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), &Bytes::from_static(b"{\"mock\":true}"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url, "http://collector.test/track");
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
        Ok(())
    }

    #[tokio::test]
    async fn test_mock_default_reply_applies_to_unlisted_urls() -> Result<()> {
        let transport = MockTransport::new()
            .with_default_reply(MockReply::Respond {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: Bytes::from_static(b"down"),
            })
            .with_reply("http://collector.test/track", MockReply::ok_json("{}"));

        let listed = transport.send(post("http://collector.test/track", "{}")).await?;
        assert_eq!(listed.status(), StatusCode::OK);

        let unlisted = transport.send(post("http://collector.test/other", "{}")).await?;
        assert_eq!(unlisted.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(unlisted.body().as_ref(), b"down");
        Ok(())
    }

    #[tokio::test]
    async fn test_mock_per_url_failure() -> Result<()> {
        let transport = MockTransport::new()
            .with_reply("http://collector.test/track", MockReply::Fail("dns failure".into()));

        let err = transport
            .send(post("http://collector.test/track", "{}"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dns failure"));

        transport
            .send(post("http://collector.test/conversion", "{}"))
            .await?;
        assert_eq!(transport.requests_to("http://collector.test/conversion").len(), 1);
        assert_eq!(transport.requests().len(), 2);
        Ok(())
    }
}
