use super::scale::{points_to_grade, Grade, RiskLevel};
use serde::{Deserialize, Serialize};

/// One sub-grading's contribution to the consensus grade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GradeComponent {
    pub label: String,
    pub grade: Grade,
}

impl GradeComponent {
    pub fn new(label: &str, grade: Grade) -> Self {
        Self {
            label: label.to_string(),
            grade,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsensusGrade {
    pub grade: Grade,
    pub risk_level: RiskLevel,
}

/// Average the point values of all present components and map back to a
/// letter. Components are weighted equally. With no components there is no
/// average to take, so no grade is produced.
pub fn aggregate_grades(components: &[GradeComponent]) -> Option<ConsensusGrade> {
    if components.is_empty() {
        return None;
    }

    let total: f64 = components.iter().map(|c| c.grade.points()).sum();
    let grade = points_to_grade(total / components.len() as f64);

    Some(ConsensusGrade {
        grade,
        risk_level: grade.risk_level(),
    })
}
