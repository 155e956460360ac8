use crate::grading::scale::{Grade, RiskLevel, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred purpose of an observed cookie.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CookieCategory {
    Analytics,
    Advertising,
    Session,
    Functional,
    Unknown,
}

impl fmt::Display for CookieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CookieCategory::Analytics => "analytics",
            CookieCategory::Advertising => "advertising",
            CookieCategory::Session => "session",
            CookieCategory::Functional => "functional",
            CookieCategory::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Stage of the consent lifecycle at which cookies were observed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
    BeforeConsent,
    AfterAccept,
    AfterReject,
}

impl ConsentState {
    /// Parse the wire token. Unrecognized tokens yield `None`, which the
    /// grader treats as matching no consent-sensitive rule.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "before_consent" => Some(ConsentState::BeforeConsent),
            "after_accept" => Some(ConsentState::AfterAccept),
            "after_reject" => Some(ConsentState::AfterReject),
            _ => None,
        }
    }
}

/// One observed cookie with its classification. Immutable once classified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CookieRecord {
    pub name: String,
    pub category: CookieCategory,
}

/// Per-category cookie tallies. Counts always sum to the number of
/// classified cookies in the request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub analytics: u32,
    pub advertising: u32,
    pub session: u32,
    pub functional: u32,
    pub unknown: u32,
}

impl CategoryCounts {
    pub fn tally(&mut self, category: CookieCategory) {
        match category {
            CookieCategory::Analytics => self.analytics += 1,
            CookieCategory::Advertising => self.advertising += 1,
            CookieCategory::Session => self.session += 1,
            CookieCategory::Functional => self.functional += 1,
            CookieCategory::Unknown => self.unknown += 1,
        }
    }

    /// Analytics plus advertising: the cookies that need consent.
    pub fn non_essential(&self) -> u32 {
        self.analytics + self.advertising
    }

    pub fn total(&self) -> u32 {
        self.analytics + self.advertising + self.session + self.functional + self.unknown
    }
}

/// Whether the policy text admits to each tracking category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisclosureMap {
    pub analytics: bool,
    pub advertising: bool,
    pub session: bool,
    pub functional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

/// Output of the cookie truthfulness grader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TruthfulnessResult {
    pub score: u32,
    pub grade: Grade,
    pub risk_level: RiskLevel,
    pub issues: Vec<Issue>,
    pub cookies: Vec<CookieRecord>,
    pub category_counts: CategoryCounts,
    pub consent_state: Option<ConsentState>,
}
