use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixelConfig {
    /// Collector endpoint for click events.
    pub api_url: String,
    /// Collector endpoint for conversions. Not derived from `api_url`.
    pub conversion_url: String,
    /// Identifier stamped on every click event.
    pub pixel_id: String,
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/events/track".into(),
            conversion_url: "http://localhost:8000/api/events/conversion".into(),
            pixel_id: "px_demo_001".into(),
        }
    }
}

impl PixelConfig {
    /// Apply non-empty overrides from a host-supplied settings `lookup` on top
    /// of the defaults. The pixel itself never reads process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("TP_API_URL") {
            if !v.is_empty() {
                cfg.api_url = v;
            }
        }
        if let Some(v) = lookup("TP_CONVERSION_URL") {
            if !v.is_empty() {
                cfg.conversion_url = v;
            }
        }
        if let Some(v) = lookup("TP_PIXEL_ID") {
            if !v.is_empty() {
                cfg.pixel_id = v;
            }
        }
        cfg.validate()?;
        tracing::debug!(
            api_url = %cfg.api_url,
            conversion_url = %cfg.conversion_url,
            pixel_id = %cfg.pixel_id,
            "pixel config loaded"
        );
        Ok(cfg)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_conversion_url(mut self, url: impl Into<String>) -> Self {
        self.conversion_url = url.into();
        self
    }

    pub fn with_pixel_id(mut self, pixel_id: impl Into<String>) -> Self {
        self.pixel_id = pixel_id.into();
        self
    }

    /// Both endpoints must be absolute URLs and the pixel id non-empty.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url)
            .with_context(|| format!("invalid api_url: {}", self.api_url))?;
        Url::parse(&self.conversion_url)
            .with_context(|| format!("invalid conversion_url: {}", self.conversion_url))?;
        if self.pixel_id.is_empty() {
            bail!("pixel_id must not be empty");
        }
        Ok(())
    }
}
