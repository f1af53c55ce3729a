//! Read-only view of the page the pixel is embedded in.

/// Document loading phase as reported by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    Loading,
    Interactive,
    #[default]
    Complete,
}

/// Ambient page, navigator and screen properties.
///
/// Fingerprint-style properties are optional because hosts may not expose them.
pub trait EnvironmentReader: Send + Sync {
    fn ready_state(&self) -> ReadyState;
    /// Full current URL including the query string.
    fn location_href(&self) -> String;
    /// Referring URL; empty when there is none.
    fn referrer(&self) -> String;
    fn user_agent(&self) -> String;
    fn screen_width(&self) -> Option<u32>;
    fn screen_height(&self) -> Option<u32>;
    fn timezone(&self) -> Option<String>;
    fn language(&self) -> Option<String>;
    fn platform(&self) -> Option<String>;
}

/// Fixed environment, for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    pub ready_state: ReadyState,
    pub location_href: String,
    pub referrer: String,
    pub user_agent: String,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub platform: Option<String>,
}

impl StaticEnvironment {
    pub fn new(location_href: impl Into<String>) -> Self {
        Self {
            location_href: location_href.into(),
            ..Default::default()
        }
    }

    pub fn with_ready_state(mut self, ready_state: ReadyState) -> Self {
        self.ready_state = ready_state;
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen_width = Some(width);
        self.screen_height = Some(height);
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

impl EnvironmentReader for StaticEnvironment {
    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn location_href(&self) -> String {
        self.location_href.clone()
    }

    fn referrer(&self) -> String {
        self.referrer.clone()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn screen_width(&self) -> Option<u32> {
        self.screen_width
    }

    fn screen_height(&self) -> Option<u32> {
        self.screen_height
    }

    fn timezone(&self) -> Option<String> {
        self.timezone.clone()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn platform(&self) -> Option<String> {
        self.platform.clone()
    }
}
