//! Attribution signals from the landing URL.

use tp_core::{AttributionSignals, ClickIdType, ClickIdentity};
use url::{form_urlencoded, Url};

/// Read the seven recognised attribution parameters from `current_url`.
///
/// Missing parameters stay `None`. When a parameter repeats, the first
/// occurrence wins. Unknown parameters are ignored.
pub fn extract(current_url: &str) -> AttributionSignals {
    let parsed = Url::parse(current_url).ok();
    let query = match &parsed {
        Some(url) => url.query().unwrap_or_default(),
        None => raw_query(current_url),
    };

    let mut signals = AttributionSignals::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            "utm_source" => &mut signals.utm_source,
            "utm_medium" => &mut signals.utm_medium,
            "utm_campaign" => &mut signals.utm_campaign,
            "utm_term" => &mut signals.utm_term,
            "utm_content" => &mut signals.utm_content,
            "fbclid" => &mut signals.fbclid,
            "gclid" => &mut signals.gclid,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }
    signals
}

/// Query part of a URL that did not parse as absolute (e.g. `/landing?a=1`).
fn raw_query(url: &str) -> &str {
    let before_fragment = url.split('#').next().unwrap_or(url);
    before_fragment
        .split_once('?')
        .map(|(_, query)| query)
        .unwrap_or_default()
}

/// Pick the click identifier: `fbclid` first, then `gclid`.
///
/// An empty identifier counts as absent. Only one is ever chosen.
pub fn resolve_click_identity(signals: &AttributionSignals) -> ClickIdentity {
    [
        (ClickIdType::Fbclid, &signals.fbclid),
        (ClickIdType::Gclid, &signals.gclid),
    ]
    .into_iter()
    .find_map(|(kind, id)| {
        id.as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| ClickIdentity::new(v, kind))
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_partial_utm() {
        let signals = extract("https://x.test/?utm_source=fb&utm_campaign=sale");
        assert_eq!(signals.utm_source.as_deref(), Some("fb"));
        assert_eq!(signals.utm_medium, None);
        assert_eq!(signals.utm_campaign.as_deref(), Some("sale"));
        assert_eq!(signals.utm_term, None);
        assert_eq!(signals.utm_content, None);
        assert_eq!(signals.fbclid, None);
        assert_eq!(signals.gclid, None);
    }

    #[test]
    fn test_extract_all_fields_and_ignores_unknown() {
        let signals = extract(
            "https://shop.test/p?utm_source=google&utm_medium=cpc&utm_campaign=spring\
             &utm_term=red+shoes&utm_content=ad%201&gclid=G1&ref=abc",
        );
        assert_eq!(
            signals,
            AttributionSignals {
                utm_source: Some("google".into()),
                utm_medium: Some("cpc".into()),
                utm_campaign: Some("spring".into()),
                utm_term: Some("red shoes".into()),
                utm_content: Some("ad 1".into()),
                fbclid: None,
                gclid: Some("G1".into()),
            }
        );
    }

    #[test]
    fn test_extract_no_query() {
        assert_eq!(extract("https://x.test/landing"), AttributionSignals::default());
        assert_eq!(extract(""), AttributionSignals::default());
    }

    #[test]
    fn test_extract_ignores_fragment_and_keeps_first_duplicate() {
        let signals = extract("https://x.test/?utm_source=a&utm_source=b#utm_medium=c");
        assert_eq!(signals.utm_source.as_deref(), Some("a"));
        assert_eq!(signals.utm_medium, None);
    }

    #[test]
    fn test_extract_relative_url() {
        let signals = extract("/landing?fbclid=F9#top");
        assert_eq!(signals.fbclid.as_deref(), Some("F9"));
    }

    #[test]
    fn test_extract_keeps_empty_utm() {
        let signals = extract("https://x.test/?utm_source=");
        assert_eq!(signals.utm_source.as_deref(), Some(""));
    }

    #[test]
    fn test_fbclid_wins_over_gclid() {
        let click = resolve_click_identity(&extract("https://x.test/?fbclid=A&gclid=B"));
        assert_eq!(click, ClickIdentity::new("A", ClickIdType::Fbclid));
    }

    #[test]
    fn test_gclid_only() {
        let click = resolve_click_identity(&extract("https://x.test/?gclid=B"));
        assert_eq!(click.click_id.as_deref(), Some("B"));
        assert_eq!(click.click_id_type, Some(ClickIdType::Gclid));
    }

    #[test]
    fn test_no_click_id() {
        let click = resolve_click_identity(&extract("https://x.test/?utm_source=fb"));
        assert_eq!(click.click_id, None);
        assert_eq!(click.click_id_type, None);
    }

    #[test]
    fn test_empty_fbclid_falls_through() {
        let click = resolve_click_identity(&extract("https://x.test/?fbclid=&gclid=B"));
        assert_eq!(click, ClickIdentity::new("B", ClickIdType::Gclid));
    }
}
