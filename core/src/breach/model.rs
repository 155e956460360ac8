use crate::grading::scale::{Grade, RiskLevel, Severity};
use serde::{Deserialize, Serialize};

/// One publicly reported security incident recovered from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Incident {
    pub date: String,
    pub event: String,
    pub impact: String,
    pub severity: Severity,
    pub source_url: String,
}

/// Structured view of a breach-history snapshot. At most five incidents are
/// retained; sources are the sorted, de-duplicated, non-empty source URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreachSnapshot {
    pub incidents: Vec<Incident>,
    pub synopsis: String,
    pub sources: Vec<String>,
    pub grade: Grade,
    pub risk_level: RiskLevel,
}
