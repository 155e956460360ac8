use privacy_audit_core::audit::render::{render_flaws_csv, render_incidents_csv};
use privacy_audit_core::audit::workflow::{run_audit, AuditRequest};
use privacy_audit_core::cookies::model::ConsentState;
use privacy_audit_core::flaws::model::PolicyReport;
use serde_json::json;

fn main() {
    // audit_runner runs a deterministic self-audit through the full
    // pipeline: policy flaws + highlighting, cookie truthfulness, breach
    // snapshot parsing, consensus aggregation. It prints one line per
    // component plus the consensus and exits non-zero if consecutive runs
    // diverge or no consensus is produced.
    let request = make_self_audit_request();

    let report = run_audit(&request);
    let report2 = run_audit(&request);
    if report != report2 {
        eprintln!("AUDIT_DETERMINISM FAIL (audit_id {})", report.audit_id);
        std::process::exit(1);
    }

    println!("AUDIT {} flaws={}", report.audit_id, report.flaws.len());
    for component in &report.components {
        println!("COMPONENT {} {}", component.label, component.grade);
    }

    match &report.consensus {
        Some(consensus) => {
            println!("CONSENSUS {} {}", consensus.grade, consensus.risk_level)
        }
        None => {
            eprintln!("CONSENSUS unavailable (no grade components)");
            std::process::exit(1);
        }
    }

    let flaws_csv = render_flaws_csv(&report.flaws).expect("render flaws csv");
    print!("{}", flaws_csv);
    if let Some(breach) = &report.breach {
        let incidents_csv = render_incidents_csv(&breach.incidents).expect("render incidents csv");
        print!("{}", incidents_csv);
    }
}

fn make_self_audit_request() -> AuditRequest {
    let policy_text = "We may share information with third party partners at our sole \
                       discretion. Data is retained indefinitely. You can opt-out at any \
                       time using our site settings.";

    let policy_report = json!({
        "risk_score": 48,
        "categories": {
            "2.Third Parties": {
                "subgroups": {
                    "Sharing": [
                        {"term": "third party", "count": 1}
                    ]
                }
            },
            "3.User Rights": {
                "subgroups": {
                    "Controls": [
                        {"term": "sole discretion", "count": 1}
                    ]
                }
            },
            "4.Retention": {
                "subgroups": {
                    "Timelines": [
                        {"term": "indefinitely", "count": 1}
                    ]
                }
            }
        }
    });
    let policy_report: PolicyReport =
        serde_json::from_value(policy_report).expect("self-audit report decodes");

    let breach_snapshot = r#"{
        "incidents": [
            {
                "date": "2023-05-01",
                "event": "Credential stuffing campaign",
                "impact": "Password resets forced for affected accounts",
                "severity": "MEDIUM",
                "source_url": "https://example.com/advisory"
            }
        ],
        "synopsis": "One moderate incident on record."
    }"#;

    AuditRequest {
        policy_text: policy_text.to_string(),
        policy_report: Some(policy_report),
        observed_cookie_text: "_ga\n_gid\nsession_id\ntheme".to_string(),
        consent_state: ConsentState::from_token("after_accept"),
        breach_snapshot_text: Some(breach_snapshot.to_string()),
    }
}
