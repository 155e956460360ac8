use super::grade::breach_grade;
use super::model::{BreachSnapshot, Incident};
use crate::grading::scale::Severity;
use serde_json::Value;
use std::collections::BTreeSet;

const MAX_INCIDENTS: usize = 5;

const FALLBACK_IMPACT: &str = "Details not structured by model output.";
const FALLBACK_SYNOPSIS: &str = "Model returned unstructured output; review manually.";

/// Slice the candidate JSON payload: first `{` through last `}`.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Normalize a free-text severity label.
fn normalize_severity(level: &str) -> Severity {
    match level.trim().to_lowercase().as_str() {
        "high" | "critical" | "severe" => Severity::High,
        "medium" | "moderate" => Severity::Medium,
        _ => Severity::Low,
    }
}

/// Stringify a JSON field: strings are trimmed verbatim, other values use
/// their JSON rendering, missing or null is empty.
fn field_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Outcome of the strict-JSON decode attempt. Anything that is not a JSON
/// object routes to the line-based fallback; this is a data decision, not
/// exception control flow.
enum StructuredDecode {
    Parsed {
        incidents: Vec<Incident>,
        synopsis: String,
    },
    NeedsFallback,
}

fn decode_structured(snapshot_text: &str) -> StructuredDecode {
    let payload = match extract_json_object(snapshot_text) {
        Some(p) => p,
        None => return StructuredDecode::NeedsFallback,
    };
    let parsed: Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(_) => return StructuredDecode::NeedsFallback,
    };
    let obj = match parsed.as_object() {
        Some(o) => o,
        None => return StructuredDecode::NeedsFallback,
    };

    let synopsis = field_string(obj.get("synopsis"));

    let mut incidents = Vec::new();
    if let Some(raw_incidents) = obj.get("incidents").and_then(Value::as_array) {
        // Only the first five raw entries are considered, even if later
        // entries would survive the shape filter.
        for raw in raw_incidents.iter().take(MAX_INCIDENTS) {
            if !raw.is_object() {
                continue;
            }
            let event = field_string(raw.get("event"));
            if event.is_empty() {
                continue;
            }

            let date = field_string(raw.get("date"));
            let impact = field_string(raw.get("impact"));
            let source_url = field_string(raw.get("source_url"));
            let keep_url =
                source_url.starts_with("http://") || source_url.starts_with("https://");

            incidents.push(Incident {
                date: if date.is_empty() {
                    "Unknown".to_string()
                } else {
                    date
                },
                event,
                impact: if impact.is_empty() {
                    "Impact not specified.".to_string()
                } else {
                    impact
                },
                severity: normalize_severity(&field_string(raw.get("severity"))),
                source_url: if keep_url { source_url } else { String::new() },
            });
        }
    }

    StructuredDecode::Parsed {
        incidents,
        synopsis,
    }
}

/// Line-based recovery for conversational or malformed snapshots. Each
/// surviving line becomes one medium-severity incident, capped at five.
fn parse_fallback(snapshot_text: &str) -> (Vec<Incident>, String) {
    let mut incidents = Vec::new();
    let mut synopsis = String::new();

    for line in snapshot_text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("```") {
            continue;
        }

        if line.to_lowercase().starts_with("synopsis:") {
            synopsis = line
                .splitn(2, ':')
                .nth(1)
                .unwrap_or("")
                .trim()
                .to_string();
            continue;
        }

        let cleaned = line
            .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•' || c.is_whitespace())
            .trim();
        if cleaned.is_empty() || cleaned == "{" || cleaned == "}" {
            continue;
        }

        incidents.push(Incident {
            date: "Unknown".to_string(),
            event: cleaned.to_string(),
            impact: FALLBACK_IMPACT.to_string(),
            severity: Severity::Medium,
            source_url: String::new(),
        });

        if incidents.len() >= MAX_INCIDENTS {
            break;
        }
    }

    if synopsis.is_empty() {
        synopsis = FALLBACK_SYNOPSIS.to_string();
    }

    (incidents, synopsis)
}

/// Parse a breach-history snapshot of unknown quality into structured
/// records. Tries the strict-JSON decode first and falls back to line
/// parsing; never errors, worst case is zero incidents plus the
/// manual-review synopsis.
pub fn parse_breach_snapshot(snapshot_text: &str) -> BreachSnapshot {
    let (incidents, synopsis) = match decode_structured(snapshot_text) {
        StructuredDecode::Parsed {
            incidents,
            synopsis,
        } => (incidents, synopsis),
        StructuredDecode::NeedsFallback => parse_fallback(snapshot_text),
    };

    let sources: Vec<String> = incidents
        .iter()
        .filter(|incident| !incident.source_url.is_empty())
        .map(|incident| incident.source_url.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let (grade, risk_level) = breach_grade(&incidents);

    BreachSnapshot {
        incidents,
        synopsis,
        sources,
        grade,
        risk_level,
    }
}
