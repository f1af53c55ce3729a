use std::sync::Arc;

use tp_core::SessionId;
use tp_storage::CookieStore;
use tracing::debug;

pub const SESSION_COOKIE: &str = "_track_session";
pub const SESSION_TTL_DAYS: u32 = 30;

/// Read-or-create access to the visitor's session cookie.
///
/// There is no locking around first creation: two pages racing before either
/// has written the cookie can each mint their own identity.
#[derive(Clone)]
pub struct SessionIdentity {
    store: Arc<dyn CookieStore>,
}

impl SessionIdentity {
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self { store }
    }

    /// Return the stored session, minting and persisting one if none exists.
    pub fn ensure(&self) -> SessionId {
        if let Some(existing) = self.store.get(SESSION_COOKIE).filter(|v| !v.is_empty()) {
            return SessionId(existing);
        }

        let session_id = SessionId::generate();
        self.store
            .set(SESSION_COOKIE, session_id.as_str(), SESSION_TTL_DAYS);
        debug!(session_id = %session_id, "new session created");
        session_id
    }
}
