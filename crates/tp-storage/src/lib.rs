//! Cookie persistence capability for the pixel.
//!
//! The pixel only ever needs to read and write one string-valued cookie, so
//! the store is a small synchronous get/set seam. [`CookieJar`] keeps the
//! jar in memory and behaves like a document cookie jar: reads go through
//! the rendered `name=value; name=value` header, writes are recorded as
//! `Set-Cookie`-style strings with an absolute expiry.

mod jar;

pub use jar::{CookieJar, CookieWrite};

/// Path scope applied to every cookie the pixel writes.
pub const COOKIE_PATH: &str = "/";
/// `SameSite` attribute applied to every cookie the pixel writes.
pub const COOKIE_SAME_SITE: &str = "Lax";

/// Read/write access to a single cookie by name.
pub trait CookieStore: Send + Sync {
    /// Value of the first cookie named exactly `name`.
    fn get(&self, name: &str) -> Option<String>;

    /// Write `name=value` scoped to the root path, expiring `ttl_days` from now.
    fn set(&self, name: &str, value: &str, ttl_days: u32);
}

/// Look `name` up in a rendered cookie header. First match wins.
pub fn parse_cookie_header<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split("; ").find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != name {
            return None;
        }
        value.split(';').next()
    })
}

/// Store for a context where cookies are disabled: reads miss, writes vanish.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCookieStore;

impl CookieStore for DisabledCookieStore {
    fn get(&self, _name: &str) -> Option<String> {
        None
    }

    fn set(&self, name: &str, _value: &str, _ttl_days: u32) {
        tracing::trace!(cookie = name, "cookie write dropped, cookies disabled");
    }
}
