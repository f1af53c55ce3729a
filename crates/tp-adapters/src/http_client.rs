use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use tracing::debug;

use crate::Transport;

/// Collector transport over HTTP(S) using reqwest.
///
/// No timeout or retry is configured; the client defaults apply.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let start = std::time::Instant::now();
        let method = request.method().clone();
        let uri = request.uri().clone();

        let request = reqwest::Request::try_from(request).context("failed to build request")?;
        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("request to {} failed", uri))?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .context("failed to read response body")?;

        debug!(
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = start.elapsed().as_millis(),
            "collector request completed"
        );

        let mut out = Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}
