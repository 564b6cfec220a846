//! Rule-based normalizer for clinical free text.
//!
//! Rules run in a fixed order, each step feeding the next:
//! 1. Punctuation remap (smart quotes, dashes, ellipsis → ASCII)
//! 2. Line endings (CRLF and lone CR → LF)
//! 3. Blank-line collapse (3+ newlines → 2)
//! 4. Trim
//!
//! Every rule whose pattern occurs in its input stage adds exactly one entry
//! to the log. The normalizer is pure and total: it never fails and never
//! touches shared state, so handlers call it directly without `spawn_blocking`.

pub mod rules;
pub mod types;

pub use types::{NormalizationLogEntry, NormalizedText, Rule, RuleInfo};

use rules::{collapse_blank_lines, normalize_line_endings, trim_whitespace, PUNCTUATION_RULES};

/// Normalize raw clinical text and record which rules changed it.
pub fn normalize(raw: &str) -> NormalizedText {
    let mut text = raw.to_string();
    let mut logs: Vec<NormalizationLogEntry> = Vec::new();

    for punctuation in &PUNCTUATION_RULES {
        if let Some(next) = punctuation.apply(&text) {
            text = next;
            logs.push(punctuation.rule.into());
        }
    }

    let line_steps: [(Rule, fn(&str) -> Option<String>); 3] = [
        (Rule::LineEndings, normalize_line_endings),
        (Rule::BlankLines, collapse_blank_lines),
        (Rule::Trim, trim_whitespace),
    ];
    for (rule, step) in line_steps {
        if let Some(next) = step(&text) {
            text = next;
            logs.push(rule.into());
        }
    }

    // Lengths and counts only: clinical text never goes to the log.
    tracing::debug!(
        input_len = raw.len(),
        output_len = text.len(),
        rules_fired = logs.len(),
        "Normalized clinical text"
    );

    NormalizedText {
        clean_text: text,
        logs,
    }
}

/// All rules in application order, for clients that display the log.
pub fn rule_catalog() -> Vec<RuleInfo> {
    Rule::ALL
        .into_iter()
        .map(|rule| RuleInfo {
            rule,
            description: rule.description(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(result: &NormalizedText) -> Vec<Rule> {
        result.logs.iter().map(|entry| entry.rule).collect()
    }

    #[test]
    fn smart_double_quotes_become_straight() {
        let result = normalize("He said \u{201C}Hello\u{201D}");
        assert_eq!(result.clean_text, "He said \"Hello\"");
        assert_eq!(
            fired(&result),
            vec![Rule::LeftDoubleQuote, Rule::RightDoubleQuote]
        );
    }

    #[test]
    fn crlf_text_uses_lf() {
        let result = normalize("Line1\r\nLine2\r\nLine3");
        assert_eq!(result.clean_text, "Line1\nLine2\nLine3");
        assert_eq!(fired(&result), vec![Rule::LineEndings]);
    }

    #[test]
    fn excessive_blank_lines_collapse() {
        let result = normalize("Para1\n\n\n\n\nPara2");
        assert_eq!(result.clean_text, "Para1\n\nPara2");
        assert_eq!(fired(&result), vec![Rule::BlankLines]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let result = normalize("   leading and trailing   \n");
        assert_eq!(result.clean_text, "leading and trailing");
        assert_eq!(fired(&result), vec![Rule::Trim]);
    }

    #[test]
    fn empty_input_has_empty_log() {
        let result = normalize("");
        assert_eq!(result.clean_text, "");
        assert!(result.logs.is_empty());
    }

    #[test]
    fn whitespace_only_input_logs_trim() {
        let result = normalize(" \t ");
        assert_eq!(result.clean_text, "");
        assert_eq!(fired(&result), vec![Rule::Trim]);
    }

    #[test]
    fn clean_input_is_returned_unchanged() {
        let note = "BP 120/80 mmHg.\n\nFollow-up in 2 weeks.";
        let result = normalize(note);
        assert_eq!(result.clean_text, note);
        assert!(result.logs.is_empty());
    }

    #[test]
    fn repeated_character_logs_once() {
        let result = normalize("a\u{2026} b\u{2026} c\u{2026}");
        assert_eq!(result.clean_text, "a... b... c...");
        assert_eq!(fired(&result), vec![Rule::Ellipsis]);
    }

    #[test]
    fn crlf_runs_collapse_after_conversion() {
        // Three CRLF pairs only become a 3-newline run after step 2.
        let result = normalize("Assessment\r\n\r\n\r\nPlan");
        assert_eq!(result.clean_text, "Assessment\n\nPlan");
        assert_eq!(fired(&result), vec![Rule::LineEndings, Rule::BlankLines]);
    }

    #[test]
    fn mixed_note_fires_rules_in_fixed_order() {
        let raw = "\r\n  Pt\u{2019}s \u{2018}chief complaint\u{2019}\u{2014}chest pain \
                   2\u{2013}3 days\u{2026}\r\n\r\n\r\n\r\nPlan: ECG  \n";
        let result = normalize(raw);
        assert_eq!(
            result.clean_text,
            "Pt's 'chief complaint'--chest pain 2-3 days...\n\nPlan: ECG"
        );
        assert_eq!(
            fired(&result),
            vec![
                Rule::LeftSingleQuote,
                Rule::RightSingleQuote,
                Rule::EnDash,
                Rule::EmDash,
                Rule::Ellipsis,
                Rule::LineEndings,
                Rule::BlankLines,
                Rule::Trim,
            ]
        );
    }

    #[test]
    fn log_entries_carry_descriptions() {
        let result = normalize("\u{2014}");
        assert_eq!(result.clean_text, "--");
        assert_eq!(
            result.logs,
            vec![NormalizationLogEntry {
                rule: Rule::EmDash,
                description: "Replaced em dashes with double hyphens",
            }]
        );
    }

    #[test]
    fn fired_helper_matches_log() {
        let result = normalize("x\r\ny");
        assert!(result.fired(Rule::LineEndings));
        assert!(!result.fired(Rule::Trim));
    }

    #[test]
    fn catalog_lists_every_rule_in_order() {
        let catalog = rule_catalog();
        assert_eq!(catalog.len(), Rule::ALL.len());
        assert_eq!(catalog.first().unwrap().rule, Rule::LeftSingleQuote);
        assert_eq!(catalog.last().unwrap().rule, Rule::Trim);
        assert!(catalog.iter().all(|info| !info.description.is_empty()));
    }

    #[test]
    fn rule_serializes_as_snake_case() {
        let json = serde_json::to_value(NormalizationLogEntry::from(Rule::LineEndings)).unwrap();
        assert_eq!(json["rule"], "line_endings");
        assert_eq!(json["description"], "Normalized line endings to LF");
    }
}
