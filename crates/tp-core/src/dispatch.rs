use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an event did not reach the collector.
///
/// All variants are handled the same way by callers: logged, never retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to encode event: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("collector responded with status {0}")]
    Status(u16),
    #[error("malformed collector response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

/// Outcome of a single one-shot send.
#[derive(Debug)]
pub enum DispatchResult {
    /// Collector accepted the event; holds its parsed JSON reply.
    Delivered(serde_json::Value),
    Failed(DispatchError),
}

impl DispatchResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchResult::Delivered(_))
    }

    pub fn response(&self) -> Option<&serde_json::Value> {
        match self {
            DispatchResult::Delivered(v) => Some(v),
            DispatchResult::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            DispatchResult::Delivered(_) => None,
            DispatchResult::Failed(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<serde_json::Value, DispatchError> {
        match self {
            DispatchResult::Delivered(v) => Ok(v),
            DispatchResult::Failed(e) => Err(e),
        }
    }
}

/// Collector reply to a click event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub event_id: Option<String>,
}

/// Collector reply to a conversion event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub attributed: bool,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub conversion_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_accessors() {
        let ok = DispatchResult::Delivered(json!({"success": true}));
        assert!(ok.is_delivered());
        assert!(ok.error().is_none());

        let failed = DispatchResult::Failed(DispatchError::Status(502));
        assert!(!failed.is_delivered());
        assert!(failed.response().is_none());
        assert_eq!(
            failed.into_result().unwrap_err().to_string(),
            "collector responded with status 502"
        );
    }

    #[test]
    fn test_conversion_response_partial_body() {
        let ack: ConversionResponse = serde_json::from_value(json!({
            "success": true,
            "message": "Conversion tracked but not attributed (session not found)",
            "attributed": false,
            "conversion_id": "c-1"
        }))
        .unwrap();
        assert!(!ack.attributed);
        assert!(ack.campaign_id.is_none());
        assert_eq!(ack.conversion_id.as_deref(), Some("c-1"));
    }
}
