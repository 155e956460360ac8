use super::model::{Flaw, PolicyReport};
use crate::grading::scale::{Grade, Severity};

/// Severity by (category prefix, subgroup), evaluated in this order.
fn hit_severity(category_name: &str, subgroup_name: &str) -> Severity {
    if category_name.starts_with("5.") {
        Severity::High
    } else if category_name.starts_with("2.") {
        Severity::High
    } else if category_name.starts_with("1.") && subgroup_name == "High-Risk Identifiers" {
        Severity::High
    } else if category_name.starts_with("4.") && subgroup_name == "Timelines" {
        Severity::Low
    } else {
        Severity::Medium
    }
}

/// Rationale sentence by (category prefix, subgroup), evaluated in this
/// order. Unlisted combinations get the generic default.
fn hit_reason(category_name: &str, subgroup_name: &str) -> &'static str {
    if category_name.starts_with("5.") {
        "Vague promise with legal wiggle room."
    } else if category_name.starts_with("2.") {
        "Data may leave trusted boundaries."
    } else if category_name.starts_with("1.") && subgroup_name == "High-Risk Identifiers" {
        "Sensitive identifiers enable direct tracking."
    } else if category_name.starts_with("1.") && subgroup_name == "Automated Tracking" {
        "Passive tracking likely without awareness."
    } else if category_name.starts_with("3.") {
        "User control rights may be limited."
    } else if category_name.starts_with("4.") && subgroup_name == "Timelines" {
        "Retention window may be too broad."
    } else if category_name.starts_with("4.") {
        "Security wording is broad, noncommittal."
    } else {
        "Potential privacy risk indicator term."
    }
}

/// Flatten a policy-analysis report into a ranked flaw list.
///
/// Sort contract: severity rank ascending, hit count descending, term
/// lowercase ascending.
pub fn extract_flaws(report: &PolicyReport) -> Vec<Flaw> {
    let mut flaws: Vec<Flaw> = Vec::new();

    for (category_name, category) in &report.categories {
        for (subgroup_name, hits) in &category.subgroups {
            for hit in hits {
                flaws.push(Flaw {
                    category: category_name.clone(),
                    subgroup: subgroup_name.clone(),
                    term: hit.term.clone(),
                    count: hit.count,
                    severity: hit_severity(category_name, subgroup_name),
                    reason: hit_reason(category_name, subgroup_name).to_string(),
                });
            }
        }
    }

    flaws.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then(b.count.cmp(&a.count))
            .then_with(|| a.term.to_lowercase().cmp(&b.term.to_lowercase()))
    });

    flaws
}

/// Map the report's overall risk score to the policy letter grade. The
/// scale is inverted: a high risk score is a bad grade.
pub fn policy_grade(risk_score: i64) -> Grade {
    if risk_score >= 70 {
        Grade::F
    } else if risk_score >= 55 {
        Grade::D
    } else if risk_score >= 40 {
        Grade::C
    } else if risk_score >= 25 {
        Grade::B
    } else {
        Grade::A
    }
}
