use super::model::{CookieCategory, DisclosureMap};

/// Disclosure phrases per tracking category. One phrase present in the
/// policy text satisfies the whole category.
const DISCLOSURE_TERMS: &[(CookieCategory, &[&str])] = &[
    (
        CookieCategory::Analytics,
        &["analytics", "measurement", "google analytics", "mixpanel", "amplitude", "segment"],
    ),
    (
        CookieCategory::Advertising,
        &["advertising", "ad network", "targeted ads", "remarketing", "doubleclick", "facebook pixel"],
    ),
    (
        CookieCategory::Session,
        &["strictly necessary", "essential cookies", "authentication", "session cookies"],
    ),
    (
        CookieCategory::Functional,
        &["preferences", "functional cookies", "site settings", "language settings"],
    ),
];

/// Scan policy text for category disclosure language (case-insensitive
/// substring match).
pub fn policy_disclosures(policy_text: &str) -> DisclosureMap {
    let text = policy_text.to_lowercase();
    let mut disclosed = DisclosureMap::default();

    for (category, terms) in DISCLOSURE_TERMS {
        let found = terms.iter().any(|term| text.contains(term));
        match category {
            CookieCategory::Analytics => disclosed.analytics = found,
            CookieCategory::Advertising => disclosed.advertising = found,
            CookieCategory::Session => disclosed.session = found,
            CookieCategory::Functional => disclosed.functional = found,
            CookieCategory::Unknown => {}
        }
    }

    disclosed
}
