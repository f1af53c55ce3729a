use parking_lot::Mutex;
use time::{format_description::BorrowedFormatItem, macros::format_description, Duration, OffsetDateTime};
use tracing::debug;

use crate::{parse_cookie_header, CookieStore, COOKIE_PATH, COOKIE_SAME_SITE};

/// `Sun, 17 Nov 2026 12:00:00 GMT`
const EXPIRES_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const MAX_EXPIRES: &str = "Fri, 31 Dec 9999 23:59:59 GMT";

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    /// `None` for cookies seeded without an expiry (browser-session cookies).
    expires: Option<OffsetDateTime>,
}

impl StoredCookie {
    fn is_live(&self, now: OffsetDateTime) -> bool {
        self.expires.map_or(true, |at| at > now)
    }
}

/// One write made through [`CookieStore::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieWrite {
    pub name: String,
    pub value: String,
    pub expires: OffsetDateTime,
    /// The full attribute string, e.g. `a=1; expires=...; path=/; SameSite=Lax`.
    pub header: String,
}

/// In-memory document cookie jar shared by everything on the page.
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: Mutex<Vec<StoredCookie>>,
    writes: Mutex<Vec<CookieWrite>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the jar from a rendered cookie header such as `a=1; b=2`.
    pub fn with_header(header: &str) -> Self {
        let cookies = header
            .split("; ")
            .filter_map(|pair| {
                let (name, _) = pair.split_once('=')?;
                let value = parse_cookie_header(pair, name)?;
                Some(StoredCookie {
                    name: name.to_string(),
                    value: value.to_string(),
                    expires: None,
                })
            })
            .collect();
        Self {
            cookies: Mutex::new(cookies),
            writes: Mutex::default(),
        }
    }

    /// Live cookies rendered the way a page sees them.
    pub fn cookie_header(&self) -> String {
        let now = OffsetDateTime::now_utc();
        self.cookies
            .lock()
            .iter()
            .filter(|c| c.is_live(now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Every write made so far, oldest first.
    pub fn writes(&self) -> Vec<CookieWrite> {
        self.writes.lock().clone()
    }

    /// Drop a cookie as if the visitor cleared it.
    pub fn remove(&self, name: &str) {
        self.cookies.lock().retain(|c| c.name != name);
    }
}

impl CookieStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        parse_cookie_header(&self.cookie_header(), name).map(str::to_owned)
    }

    fn set(&self, name: &str, value: &str, ttl_days: u32) {
        // Clamps to the last representable instant instead of overflowing.
        let expires = OffsetDateTime::now_utc().saturating_add(Duration::days(i64::from(ttl_days)));
        let expires_str = expires
            .format(EXPIRES_FORMAT)
            .unwrap_or_else(|_| MAX_EXPIRES.to_string());
        let header = format!(
            "{name}={value}; expires={expires_str}; path={COOKIE_PATH}; SameSite={COOKIE_SAME_SITE}"
        );

        {
            let mut cookies = self.cookies.lock();
            match cookies.iter_mut().find(|c| c.name == name) {
                Some(existing) => {
                    existing.value = value.to_string();
                    existing.expires = Some(expires);
                }
                None => cookies.push(StoredCookie {
                    name: name.to_string(),
                    value: value.to_string(),
                    expires: Some(expires),
                }),
            }
        }

        debug!(cookie = name, expires = %expires_str, "cookie written");
        self.writes.lock().push(CookieWrite {
            name: name.to_string(),
            value: value.to_string(),
            expires,
            header,
        });
    }
}
