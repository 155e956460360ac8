use super::classify::{classify_cookie, parse_observed_cookies};
use super::disclosure::policy_disclosures;
use super::model::{
    CategoryCounts, ConsentState, CookieRecord, Issue, TruthfulnessResult,
};
use crate::grading::scale::{score_to_grade, Severity};

/// Grade how truthfully the policy text describes the observed cookies.
///
/// Starts at 100 and applies each deduction rule independently, in a fixed
/// order, then clamps to [0, 100] before mapping to a letter grade. Empty
/// inputs deduct nothing except the missing opt-out language rule.
pub fn grade_cookie_truthfulness(
    policy_text: &str,
    observed_cookie_text: &str,
    consent_state: Option<ConsentState>,
) -> TruthfulnessResult {
    let cookies: Vec<CookieRecord> = parse_observed_cookies(observed_cookie_text)
        .into_iter()
        .map(|name| {
            let category = classify_cookie(&name);
            CookieRecord { name, category }
        })
        .collect();

    let mut category_counts = CategoryCounts::default();
    for cookie in &cookies {
        category_counts.tally(cookie.category);
    }

    let disclosed = policy_disclosures(policy_text);

    let mut issues: Vec<Issue> = Vec::new();
    let mut score: i64 = 100;

    let consent_sensitive = matches!(
        consent_state,
        Some(ConsentState::BeforeConsent) | Some(ConsentState::AfterReject)
    );
    let non_essential = category_counts.non_essential() as i64;

    if consent_sensitive && non_essential > 0 {
        score -= (non_essential * 12).min(45);
        issues.push(Issue {
            severity: Severity::High,
            title: "Non-essential cookies loaded before consent".to_string(),
            detail: "Analytics/advertising cookies were observed when they should usually be blocked."
                .to_string(),
        });
    }

    if category_counts.analytics > 0 && !disclosed.analytics {
        score -= 20;
        issues.push(Issue {
            severity: Severity::High,
            title: "Undisclosed analytics tracking".to_string(),
            detail: "Analytics-like cookies were observed but analytics disclosure language is weak or missing."
                .to_string(),
        });
    }

    if category_counts.advertising > 0 && !disclosed.advertising {
        score -= 25;
        issues.push(Issue {
            severity: Severity::High,
            title: "Undisclosed advertising tracking".to_string(),
            detail: "Ad/remarketing-like cookies were observed but advertising disclosure language is weak or missing."
                .to_string(),
        });
    }

    if category_counts.unknown > 3 {
        score -= 10;
        issues.push(Issue {
            severity: Severity::Medium,
            title: "Many unknown cookies".to_string(),
            detail: "Several cookies could not be classified; manually verify vendor and purpose."
                .to_string(),
        });
    }

    let policy_lower = policy_text.to_lowercase();
    if !policy_lower.contains("opt-out") && !policy_lower.contains("do not sell") {
        score -= 8;
        issues.push(Issue {
            severity: Severity::Medium,
            title: "Weak opt-out language".to_string(),
            detail: "Policy text does not clearly mention opt-out or Do Not Sell controls."
                .to_string(),
        });
    }

    let score = score.clamp(0, 100);
    let grade = score_to_grade(score);

    // Stable sort: severity first, rule-evaluation order as the tie-break.
    issues.sort_by_key(|issue| issue.severity.rank());

    TruthfulnessResult {
        score: score as u32,
        grade,
        risk_level: grade.risk_level(),
        issues,
        cookies,
        category_counts,
        consent_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::scale::{Grade, RiskLevel};

    #[test]
    fn test_before_consent_with_undisclosed_trackers() {
        // 2 analytics + 1 advertising, no disclosures, opt-out present:
        // 100 - min(45, 3*12) - 20 - 25 = 19.
        let result = grade_cookie_truthfulness(
            "You can opt-out at any time.",
            "_ga\n_gid\n_fbp",
            Some(ConsentState::BeforeConsent),
        );

        assert_eq!(result.score, 19);
        assert_eq!(result.grade, Grade::F);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.issues.len(), 3);
        assert!(result.issues.iter().all(|i| i.severity == Severity::High));
        assert_eq!(result.issues[0].title, "Non-essential cookies loaded before consent");
        assert_eq!(result.issues[1].title, "Undisclosed analytics tracking");
        assert_eq!(result.issues[2].title, "Undisclosed advertising tracking");
    }

    #[test]
    fn test_empty_inputs_deduct_only_opt_out() {
        let result = grade_cookie_truthfulness("", "", None);

        assert_eq!(result.score, 92);
        assert_eq!(result.grade, Grade::A);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::Medium);
        assert_eq!(result.issues[0].title, "Weak opt-out language");
        assert!(result.cookies.is_empty());
        assert_eq!(result.category_counts.total(), 0);
    }

    #[test]
    fn test_consent_deduction_caps_at_45() {
        // 5 non-essential cookies: min(45, 60) = 45, plus 20 + 25 undisclosed.
        let result = grade_cookie_truthfulness(
            "opt-out",
            "_ga,_gid,_gat,_fbp,criteo_x",
            Some(ConsentState::AfterReject),
        );

        assert_eq!(result.score, 100 - 45 - 20 - 25);
    }

    #[test]
    fn test_after_accept_skips_consent_rule() {
        let result = grade_cookie_truthfulness(
            "We use google analytics and advertising partners. Opt-out anytime.",
            "_ga",
            Some(ConsentState::AfterAccept),
        );

        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_unrecognized_consent_still_classifies() {
        let result = grade_cookie_truthfulness(
            "We use google analytics. You may opt-out.",
            "_ga\n_gid",
            None,
        );

        // No consent deduction, analytics disclosed: perfect score.
        assert_eq!(result.score, 100);
        assert_eq!(result.category_counts.analytics, 2);
    }

    #[test]
    fn test_many_unknown_cookies_flagged() {
        let result = grade_cookie_truthfulness(
            "opt-out",
            "aaa1,bbb2,ccc3,ddd4",
            Some(ConsentState::AfterAccept),
        );

        assert_eq!(result.category_counts.unknown, 4);
        assert_eq!(result.score, 90);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].title, "Many unknown cookies");
    }

    #[test]
    fn test_counts_sum_to_cookie_total() {
        let result = grade_cookie_truthfulness(
            "",
            "_ga;_fbp;session_id;theme;mystery1",
            Some(ConsentState::AfterAccept),
        );

        assert_eq!(result.category_counts.total() as usize, result.cookies.len());
    }
}
