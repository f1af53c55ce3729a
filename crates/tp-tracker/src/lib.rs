//! Marketing attribution pixel: session identity, UTM/click-id extraction,
//! and one-shot delivery of click and conversion events to a collector.
//!
//! Host state (cookies, page URL, navigator, network) comes in through the
//! capability traits in `tp-storage` and `tp-adapters`.

pub mod attribution;
pub mod bootstrap;
pub mod dispatch;
pub mod fingerprint;
pub mod session;
pub mod telemetry;
pub mod tracker;

pub use bootstrap::{ActivationMode, Pixel};
pub use dispatch::EventDispatcher;
pub use session::{SessionIdentity, SESSION_COOKIE, SESSION_TTL_DAYS};
pub use tracker::Tracker;

pub use tp_adapters::{EnvironmentReader, ReadyState, ReqwestTransport, StaticEnvironment, Transport};
pub use tp_config::PixelConfig;
pub use tp_core::{DispatchError, DispatchResult, OrderData};
pub use tp_storage::{CookieJar, CookieStore};
