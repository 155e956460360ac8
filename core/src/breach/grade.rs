use super::model::Incident;
use crate::grading::scale::{score_to_grade, Grade, RiskLevel, Severity};

/// Per-incident score deductions.
const INCIDENT_DEDUCTIONS: &[(Severity, i64)] = &[
    (Severity::High, 28),
    (Severity::Medium, 16),
    (Severity::Low, 8),
];

fn deduction_for(severity: Severity) -> i64 {
    INCIDENT_DEDUCTIONS
        .iter()
        .find(|(s, _)| *s == severity)
        .map(|(_, amount)| *amount)
        .unwrap_or(8)
}

/// Grade a breach history: start at 100, subtract per incident by severity,
/// clamp at zero, map with the shared letter thresholds.
pub fn breach_grade(incidents: &[Incident]) -> (Grade, RiskLevel) {
    let mut score: i64 = 100;
    for incident in incidents {
        score -= deduction_for(incident.severity);
    }
    let grade = score_to_grade(score.max(0));
    (grade, grade.risk_level())
}
