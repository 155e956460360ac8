use super::model::CookieCategory;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Ordered name-pattern table. Category order is the tie-break: a name
/// matching two categories resolves to the earlier one.
const TRACKER_PATTERNS: &[(CookieCategory, &[&str])] = &[
    (
        CookieCategory::Analytics,
        &["_ga", "_gid", "_gat", "analytics", "mixpanel", "amplitude", "segment"],
    ),
    (
        CookieCategory::Advertising,
        &["_fbp", "doubleclick", "ad[sx]?", "ttclid", "gcl_au", "criteo"],
    ),
    (
        CookieCategory::Session,
        &["session", "sess", "csrf", "auth", "token"],
    ),
    (
        CookieCategory::Functional,
        &["pref", "lang", "theme", "remember"],
    ),
];

fn compiled_patterns() -> &'static [(CookieCategory, Vec<Regex>)] {
    static COMPILED: OnceLock<Vec<(CookieCategory, Vec<Regex>)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        TRACKER_PATTERNS
            .iter()
            .map(|(category, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("tracker pattern compiles"))
                    .collect();
                (*category, compiled)
            })
            .collect()
    })
}

/// Classify a cookie name by pattern search against the lowercased name.
/// First category with any matching pattern wins; no match is `unknown`.
pub fn classify_cookie(cookie_name: &str) -> CookieCategory {
    let lower = cookie_name.to_lowercase();
    for (category, patterns) in compiled_patterns() {
        if patterns.iter().any(|p| p.is_match(&lower)) {
            return *category;
        }
    }
    CookieCategory::Unknown
}

/// Split a free-form observed-cookie blob into cookie names.
///
/// Tokens are separated by newlines, commas, or semicolons; a `name=value`
/// token keeps only the name. Names are de-duplicated case-insensitively
/// (first-seen spelling wins) and returned sorted by lowercase name.
pub fn parse_observed_cookies(raw_text: &str) -> Vec<String> {
    let mut by_lower: BTreeMap<String, String> = BTreeMap::new();

    for token in raw_text.split(['\n', ',', ';']) {
        let mut name = token.trim();
        if let Some((before_eq, _)) = name.split_once('=') {
            name = before_eq.trim();
        }
        if name.is_empty() {
            continue;
        }
        by_lower
            .entry(name.to_lowercase())
            .or_insert_with(|| name.to_string());
    }

    by_lower.into_values().collect()
}
