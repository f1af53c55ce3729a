use std::sync::Arc;

use tp_adapters::{EnvironmentReader, Transport};
use tp_config::PixelConfig;
use tp_core::{
    ConversionEvent, DispatchResult, EnvironmentFingerprint, EventType, OrderData,
    TrackingEvent,
};
use tp_storage::CookieStore;

use crate::attribution::{extract, resolve_click_identity};
use crate::dispatch::EventDispatcher;
use crate::fingerprint;
use crate::session::SessionIdentity;

/// Builds and sends pixel events for one embedding page.
pub struct Tracker {
    pixel_id: String,
    env: Arc<dyn EnvironmentReader>,
    session: SessionIdentity,
    dispatcher: EventDispatcher,
}

impl Tracker {
    pub fn new(
        config: &PixelConfig,
        env: Arc<dyn EnvironmentReader>,
        cookies: Arc<dyn CookieStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            pixel_id: config.pixel_id.clone(),
            env,
            session: SessionIdentity::new(cookies),
            dispatcher: EventDispatcher::from_config(transport, config),
        }
    }

    pub fn env(&self) -> &dyn EnvironmentReader {
        self.env.as_ref()
    }

    pub fn session(&self) -> &SessionIdentity {
        &self.session
    }

    /// Assemble the click event for the current page.
    ///
    /// Attribution is read before the session is resolved, so one call always
    /// sees a single URL snapshot.
    pub fn build_click_event(&self) -> TrackingEvent {
        let page_url = self.env.location_href();
        let signals = extract(&page_url);
        let session_id = self.session.ensure();
        let click = resolve_click_identity(&signals);
        let referrer = Some(self.env.referrer()).filter(|r| !r.is_empty());

        TrackingEvent {
            pixel_id: self.pixel_id.clone(),
            event_type: EventType::Click,
            session_id,
            click_id: click.click_id,
            click_id_type: click.click_id_type,
            utm_source: signals.utm_source,
            utm_medium: signals.utm_medium,
            utm_campaign: signals.utm_campaign,
            utm_term: signals.utm_term,
            utm_content: signals.utm_content,
            page_url,
            referrer,
            user_agent: self.env.user_agent(),
        }
    }

    pub async fn track_click(&self) -> DispatchResult {
        let event = self.build_click_event();
        self.dispatcher.send_click_event(&event).await
    }

    pub fn build_conversion_event(&self, order: OrderData) -> ConversionEvent {
        ConversionEvent::from_order(self.session.ensure(), order)
    }

    pub async fn track_conversion(&self, order: OrderData) -> DispatchResult {
        let event = self.build_conversion_event(order);
        self.dispatcher.send_conversion_event(&event).await
    }

    /// Device snapshot for callers that want to enrich their own payloads.
    /// Pixel events never include it.
    pub fn fingerprint(&self) -> EnvironmentFingerprint {
        fingerprint::collect(self.env.as_ref())
    }
}
