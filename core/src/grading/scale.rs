use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade shared by every sub-grading and the final consensus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// GPA-style point value used by the consensus average.
    pub fn points(self) -> f64 {
        match self {
            Grade::A => 4.0,
            Grade::B => 3.0,
            Grade::C => 2.0,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            Grade::A | Grade::B => RiskLevel::Low,
            Grade::C => RiskLevel::Medium,
            Grade::D | Grade::F => RiskLevel::High,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{}", label)
    }
}

/// Finding severity. Rank order is the sort contract: high sorts first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        write!(f, "{}", label)
    }
}

/// Map a 0-100 score to a letter grade.
pub fn score_to_grade(score: i64) -> Grade {
    if score >= 85 {
        Grade::A
    } else if score >= 70 {
        Grade::B
    } else if score >= 55 {
        Grade::C
    } else if score >= 40 {
        Grade::D
    } else {
        Grade::F
    }
}

/// Map an averaged point value back to a letter grade.
pub fn points_to_grade(points: f64) -> Grade {
    if points >= 3.5 {
        Grade::A
    } else if points >= 2.5 {
        Grade::B
    } else if points >= 1.5 {
        Grade::C
    } else if points >= 0.5 {
        Grade::D
    } else {
        Grade::F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_thresholds() {
        assert_eq!(score_to_grade(100), Grade::A);
        assert_eq!(score_to_grade(85), Grade::A);
        assert_eq!(score_to_grade(84), Grade::B);
        assert_eq!(score_to_grade(70), Grade::B);
        assert_eq!(score_to_grade(55), Grade::C);
        assert_eq!(score_to_grade(40), Grade::D);
        assert_eq!(score_to_grade(39), Grade::F);
        assert_eq!(score_to_grade(0), Grade::F);
    }

    #[test]
    fn test_grade_risk_mapping() {
        assert_eq!(Grade::A.risk_level(), RiskLevel::Low);
        assert_eq!(Grade::B.risk_level(), RiskLevel::Low);
        assert_eq!(Grade::C.risk_level(), RiskLevel::Medium);
        assert_eq!(Grade::D.risk_level(), RiskLevel::High);
        assert_eq!(Grade::F.risk_level(), RiskLevel::High);
    }

    #[test]
    fn test_points_round_trip_boundaries() {
        assert_eq!(points_to_grade(4.0), Grade::A);
        assert_eq!(points_to_grade(3.5), Grade::A);
        assert_eq!(points_to_grade(3.49), Grade::B);
        assert_eq!(points_to_grade(2.0), Grade::C);
        assert_eq!(points_to_grade(0.5), Grade::D);
        assert_eq!(points_to_grade(0.49), Grade::F);
    }

    #[test]
    fn test_severity_rank_order() {
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
    }
}
