use serde::{Deserialize, Serialize};
use std::fmt;

pub mod dispatch;
pub mod id;

pub use dispatch::{ConversionResponse, DispatchError, DispatchResult, TrackResponse};

/// Currency attached to a conversion when the caller does not supply one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Durable per-visitor token, `sess_<uuid4>`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub const PREFIX: &'static str = "sess_";

    /// Mint a fresh identity from the identifier generator.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, id::generate()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the attribution parameters found on the landing URL.
///
/// Every field is always present in the record; a parameter missing from
/// the URL is `None`, never an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct AttributionSignals {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub fbclid: Option<String>,
    pub gclid: Option<String>,
}

/// Ad platform that minted a click identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClickIdType {
    Fbclid,
    Gclid,
}

impl ClickIdType {
    pub fn as_str(self) -> &'static str {
        match self {
            ClickIdType::Fbclid => "fbclid",
            ClickIdType::Gclid => "gclid",
        }
    }
}

/// The single click identifier chosen from the signals, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct ClickIdentity {
    pub click_id: Option<String>,
    pub click_id_type: Option<ClickIdType>,
}

impl ClickIdentity {
    pub fn new(click_id: impl Into<String>, click_id_type: ClickIdType) -> Self {
        Self {
            click_id: Some(click_id.into()),
            click_id_type: Some(click_id_type),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Click,
}

/// Outbound "click" event. Field order matches the collector schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingEvent {
    pub pixel_id: String,
    pub event_type: EventType,
    pub session_id: SessionId,
    pub click_id: Option<String>,
    pub click_id_type: Option<ClickIdType>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub page_url: String,
    pub referrer: Option<String>,
    pub user_agent: String,
}

/// Order data handed to the manual conversion entry point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderData {
    pub order_id: String,
    pub revenue: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl OrderData {
    pub fn new(order_id: impl Into<String>, revenue: f64) -> Self {
        Self {
            order_id: order_id.into(),
            revenue,
            currency: None,
            email: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Outbound conversion event correlated to a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionEvent {
    pub session_id: SessionId,
    pub order_id: String,
    pub revenue: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ConversionEvent {
    /// Build from caller order data; a missing or empty currency becomes `USD`.
    pub fn from_order(session_id: SessionId, order: OrderData) -> Self {
        let currency = order
            .currency
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Self {
            session_id,
            order_id: order.order_id,
            revenue: order.revenue,
            currency,
            email: order.email,
        }
    }
}

/// Ambient device properties. Collected on demand, never transmitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct EnvironmentFingerprint {
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub platform: Option<String>,
}
