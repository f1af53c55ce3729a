use bytes::Bytes;
use http::{header, Method, Request};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use tp_adapters::Transport;
use tp_config::PixelConfig;
use tp_core::{
    ConversionEvent, ConversionResponse, DispatchError, DispatchResult, TrackResponse,
    TrackingEvent,
};

/// One-shot JSON delivery of pixel events to the collector.
///
/// Every failure (transport, status, unparsable reply) ends up as
/// [`DispatchResult::Failed`] and an `error!` log line. Nothing is retried.
#[derive(Clone)]
pub struct EventDispatcher {
    transport: Arc<dyn Transport>,
    tracking_url: String,
    conversion_url: String,
}

impl EventDispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        tracking_url: impl Into<String>,
        conversion_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            tracking_url: tracking_url.into(),
            conversion_url: conversion_url.into(),
        }
    }

    pub fn from_config(transport: Arc<dyn Transport>, config: &PixelConfig) -> Self {
        Self::new(transport, &config.api_url, &config.conversion_url)
    }

    pub async fn send_click_event(&self, event: &TrackingEvent) -> DispatchResult {
        match self.post_json(&self.tracking_url, event).await {
            Ok(response) => {
                let ack = serde_json::from_value::<TrackResponse>(response.clone()).ok();
                info!(
                    session_id = %event.session_id,
                    event_id = ?ack.and_then(|a| a.event_id),
                    response = %response,
                    "tracking pixel fired"
                );
                DispatchResult::Delivered(response)
            }
            Err(e) => {
                error!(session_id = %event.session_id, error = %e, "tracking pixel error");
                DispatchResult::Failed(e)
            }
        }
    }

    pub async fn send_conversion_event(&self, event: &ConversionEvent) -> DispatchResult {
        match self.post_json(&self.conversion_url, event).await {
            Ok(response) => {
                let ack = serde_json::from_value::<ConversionResponse>(response.clone()).ok();
                let attributed = ack.as_ref().map(|a| a.attributed);
                let conversion_id = ack.and_then(|a| a.conversion_id);
                info!(
                    session_id = %event.session_id,
                    order_id = %event.order_id,
                    attributed = ?attributed,
                    conversion_id = ?conversion_id,
                    response = %response,
                    "conversion tracked"
                );
                DispatchResult::Delivered(response)
            }
            Err(e) => {
                error!(
                    session_id = %event.session_id,
                    order_id = %event.order_id,
                    error = %e,
                    "conversion tracking error"
                );
                DispatchResult::Failed(e)
            }
        }
    }

    async fn post_json<T: Serialize>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<serde_json::Value, DispatchError> {
        let body = serde_json::to_vec(payload).map_err(DispatchError::Serialize)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Bytes::from(body))
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| DispatchError::Transport(format!("{:#}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }
        serde_json::from_slice(response.body()).map_err(DispatchError::MalformedResponse)
    }
}
