use crate::breach::model::BreachSnapshot;
use crate::breach::parser::parse_breach_snapshot;
use crate::cookies::grade::grade_cookie_truthfulness;
use crate::cookies::model::{ConsentState, TruthfulnessResult};
use crate::flaws::extract::{extract_flaws, policy_grade};
use crate::flaws::model::{Flaw, PolicyReport};
use crate::flaws::render::highlight_dangers;
use crate::grading::aggregate::{aggregate_grades, ConsensusGrade, GradeComponent};
use crate::grading::scale::Grade;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Inputs for one audit. Every signal is optional; whichever signals are
/// present contribute a grade component.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditRequest {
    pub policy_text: String,
    pub policy_report: Option<PolicyReport>,
    pub observed_cookie_text: String,
    pub consent_state: Option<ConsentState>,
    pub breach_snapshot_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditReport {
    pub audit_id: String,
    pub flaws: Vec<Flaw>,
    pub highlighted_policy: Option<String>,
    pub policy_grade: Option<Grade>,
    pub cookie_result: Option<TruthfulnessResult>,
    pub breach: Option<BreachSnapshot>,
    pub components: Vec<GradeComponent>,
    pub consensus: Option<ConsensusGrade>,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Deterministic audit id fingerprinted from the request inputs. Identical
/// requests always carry the same id.
fn audit_id(request: &AuditRequest) -> String {
    let report_json = request
        .policy_report
        .as_ref()
        .and_then(|report| serde_json::to_string(report).ok())
        .unwrap_or_default();
    let consent_token = request
        .consent_state
        .map(|state| format!("{:?}", state))
        .unwrap_or_default();

    let fingerprint = [
        request.policy_text.as_str(),
        report_json.as_str(),
        request.observed_cookie_text.as_str(),
        consent_token.as_str(),
        request.breach_snapshot_text.as_deref().unwrap_or(""),
    ]
    .join("\u{1f}");

    let digest = sha256_hex(fingerprint.as_bytes());
    format!("audit_{}", &digest[..32])
}

/// Run every available sub-grading and fold the results into one report
/// with a consensus grade. Components are gathered in Policy, Cookie,
/// Breach order.
pub fn run_audit(request: &AuditRequest) -> AuditReport {
    let (flaws, highlighted_policy, policy) = match &request.policy_report {
        Some(report) => {
            let flaws = extract_flaws(report);
            let highlighted = highlight_dangers(&request.policy_text, &flaws);
            (flaws, Some(highlighted), Some(policy_grade(report.risk_score)))
        }
        None => (Vec::new(), None, None),
    };

    let cookie_result = if request.observed_cookie_text.trim().is_empty() {
        None
    } else {
        Some(grade_cookie_truthfulness(
            &request.policy_text,
            &request.observed_cookie_text,
            request.consent_state,
        ))
    };

    let breach = request
        .breach_snapshot_text
        .as_deref()
        .map(parse_breach_snapshot);

    let mut components: Vec<GradeComponent> = Vec::new();
    if let Some(grade) = policy {
        components.push(GradeComponent::new("Policy", grade));
    }
    if let Some(result) = &cookie_result {
        components.push(GradeComponent::new("Cookie", result.grade));
    }
    if let Some(snapshot) = &breach {
        components.push(GradeComponent::new("Breach", snapshot.grade));
    }

    let consensus = aggregate_grades(&components);

    AuditReport {
        audit_id: audit_id(request),
        flaws,
        highlighted_policy,
        policy_grade: policy,
        cookie_result,
        breach,
        components,
        consensus,
    }
}
