use super::model::Flaw;
use crate::grading::scale::Severity;
use regex::RegexBuilder;
use std::collections::BTreeSet;

/// Escape text for literal inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the match pattern for one flagged term. Literal whitespace matches
/// one-or-more whitespace, literal commas match a comma with optional
/// surrounding whitespace, and purely alphabetic-or-hyphen terms get word
/// boundaries so "ads" does not match inside "roads".
fn pattern_for_term(term: &str) -> String {
    let mut pattern = String::new();
    let mut chars = term.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            pattern.push_str(r"\s+");
        } else if c == ',' {
            pattern.push_str(r"\s*,\s*");
        } else {
            pattern.push_str(&regex::escape(&c.to_string()));
        }
    }

    let word_like =
        !term.is_empty() && term.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
    if word_like {
        format!(r"\b{}\b", pattern)
    } else {
        pattern
    }
}

fn wrap_pre(body: &str) -> String {
    format!("<pre class='policy-text'>{}</pre>", body)
}

/// Mark every occurrence of a high- or medium-severity flaw term inside the
/// policy text. Longer terms are preferred over shorter terms they contain;
/// the scan is left-to-right and non-overlapping. All literal text is
/// escaped, so every input character appears exactly once in the output,
/// inside or outside a mark.
pub fn highlight_dangers(text: &str, flaws: &[Flaw]) -> String {
    let dangerous_terms: BTreeSet<&str> = flaws
        .iter()
        .filter(|f| matches!(f.severity, Severity::High | Severity::Medium))
        .map(|f| f.term.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect();

    if dangerous_terms.is_empty() {
        return wrap_pre(&escape_html(text));
    }

    let mut patterns: Vec<String> = dangerous_terms
        .iter()
        .map(|term| pattern_for_term(term))
        .collect();
    // Longest pattern first so "third party" beats "party"; ties ordered
    // lexicographically for deterministic output.
    patterns.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let combined = format!("({})", patterns.join("|"));
    let matcher = match RegexBuilder::new(&combined).case_insensitive(true).build() {
        Ok(re) => re,
        // Degenerate term sets (e.g. pattern size limits) degrade to the
        // unmarked escaped form instead of erroring.
        Err(_) => return wrap_pre(&escape_html(text)),
    };

    let mut parts = String::new();
    let mut cursor = 0;

    for m in matcher.find_iter(text) {
        if m.start() > cursor {
            parts.push_str(&escape_html(&text[cursor..m.start()]));
        }
        parts.push_str("<mark class='danger-mark'>");
        parts.push_str(&escape_html(m.as_str()));
        parts.push_str("</mark>");
        cursor = m.end();
    }
    if cursor < text.len() {
        parts.push_str(&escape_html(&text[cursor..]));
    }

    wrap_pre(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flaw(term: &str, severity: Severity) -> Flaw {
        Flaw {
            category: "1.Tracking".to_string(),
            subgroup: "Automated Tracking".to_string(),
            term: term.to_string(),
            count: 1,
            severity,
            reason: "Potential privacy risk indicator term.".to_string(),
        }
    }

    fn unmark_and_unescape(html: &str) -> String {
        html.trim_start_matches("<pre class='policy-text'>")
            .trim_end_matches("</pre>")
            .replace("<mark class='danger-mark'>", "")
            .replace("</mark>", "")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_single_term_marked_once() {
        let text = "We share data with third party advertisers";
        let out = highlight_dangers(text, &[flaw("third party", Severity::High)]);

        assert_eq!(out.matches("<mark class='danger-mark'>").count(), 1);
        assert!(out.contains("<mark class='danger-mark'>third party</mark>"));
        assert_eq!(unmark_and_unescape(&out), text);
    }

    #[test]
    fn test_longer_term_preferred_over_contained_term() {
        let text = "third party data sharing";
        let out = highlight_dangers(
            text,
            &[
                flaw("party", Severity::Medium),
                flaw("third party", Severity::High),
            ],
        );

        assert!(out.contains("<mark class='danger-mark'>third party</mark>"));
        assert!(!out.contains("<mark class='danger-mark'>party</mark>"));
    }

    #[test]
    fn test_low_severity_terms_not_highlighted() {
        let text = "retained indefinitely";
        let out = highlight_dangers(text, &[flaw("indefinitely", Severity::Low)]);

        assert_eq!(out, "<pre class='policy-text'>retained indefinitely</pre>");
    }

    #[test]
    fn test_no_flaws_escapes_fully() {
        let out = highlight_dangers("a < b & c", &[]);
        assert_eq!(out, "<pre class='policy-text'>a &lt; b &amp; c</pre>");
    }

    #[test]
    fn test_word_boundaries_on_alphabetic_terms() {
        let out = highlight_dangers("broadside ads here", &[flaw("ads", Severity::High)]);

        // "ads" inside "broadside" must not match; the standalone word must.
        assert_eq!(out.matches("<mark class='danger-mark'>").count(), 1);
        assert!(out.contains("broadside"));
    }

    #[test]
    fn test_flexible_whitespace_in_term() {
        let out = highlight_dangers(
            "we sell  personal   data",
            &[flaw("personal data", Severity::High)],
        );

        assert!(out.contains("<mark class='danger-mark'>personal   data</mark>"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let out = highlight_dangers("THIRD PARTY vendors", &[flaw("third party", Severity::High)]);
        assert!(out.contains("<mark class='danger-mark'>THIRD PARTY</mark>"));
    }

    #[test]
    fn test_escapes_inside_marks() {
        let text = "uses <tracking> pixels";
        let out = highlight_dangers(text, &[flaw("<tracking>", Severity::High)]);

        assert!(out.contains("<mark class='danger-mark'>&lt;tracking&gt;</mark>"));
        assert_eq!(unmark_and_unescape(&out), text);
    }

    #[test]
    fn test_round_trip_with_adversarial_text() {
        let text = "a & b < c > d \"quoted\" 'single' third party & more";
        let out = highlight_dangers(text, &[flaw("third party", Severity::Medium)]);
        assert_eq!(unmark_and_unescape(&out), text);
    }
}
