use crate::grading::scale::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One flagged-term occurrence reported by the term-extraction collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermHit {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub count: u32,
}

/// One report category: subgroup name to its term hits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportCategory {
    #[serde(default)]
    pub subgroups: BTreeMap<String, Vec<TermHit>>,
}

/// Externally-produced policy-analysis report. Category names carry a
/// numeric prefix ("1." .. "5."). Missing pieces default to empty rather
/// than failing the decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyReport {
    #[serde(default)]
    pub risk_score: i64,
    #[serde(default)]
    pub categories: BTreeMap<String, ReportCategory>,
}

/// One ranked finding derived from a report hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flaw {
    pub category: String,
    pub subgroup: String,
    pub term: String,
    pub count: u32,
    pub severity: Severity,
    pub reason: String,
}
