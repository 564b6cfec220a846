// Individual normalization steps. Each step returns `None` when its pattern
// does not occur in the input, so the caller can log only rules that fired.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Rule;

/// One row of the punctuation remap table.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationRule {
    pub source: char,
    pub replacement: &'static str,
    pub rule: Rule,
}

/// Legacy Windows-1252 smart punctuation and its plain-text replacement.
/// Replacements are ASCII and disjoint from every source character.
pub const PUNCTUATION_RULES: [PunctuationRule; 7] = [
    PunctuationRule {
        source: '\u{2018}', // Left single quotation mark
        replacement: "'",
        rule: Rule::LeftSingleQuote,
    },
    PunctuationRule {
        source: '\u{2019}', // Right single quotation mark
        replacement: "'",
        rule: Rule::RightSingleQuote,
    },
    PunctuationRule {
        source: '\u{201C}', // Left double quotation mark
        replacement: "\"",
        rule: Rule::LeftDoubleQuote,
    },
    PunctuationRule {
        source: '\u{201D}', // Right double quotation mark
        replacement: "\"",
        rule: Rule::RightDoubleQuote,
    },
    PunctuationRule {
        source: '\u{2013}', // En dash
        replacement: "-",
        rule: Rule::EnDash,
    },
    PunctuationRule {
        source: '\u{2014}', // Em dash
        replacement: "--",
        rule: Rule::EmDash,
    },
    PunctuationRule {
        source: '\u{2026}', // Horizontal ellipsis
        replacement: "...",
        rule: Rule::Ellipsis,
    },
];

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

impl PunctuationRule {
    pub fn apply(&self, text: &str) -> Option<String> {
        if !text.contains(self.source) {
            return None;
        }
        Some(text.replace(self.source, self.replacement))
    }
}

/// CRLF to LF, then any lone CR to LF.
pub fn normalize_line_endings(text: &str) -> Option<String> {
    if !text.contains('\r') {
        return None;
    }
    Some(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Collapse runs of three or more newlines to exactly two.
pub fn collapse_blank_lines(text: &str) -> Option<String> {
    if !BLANK_LINE_RUN.is_match(text) {
        return None;
    }
    Some(BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned())
}

/// Strip leading and trailing whitespace, newlines included.
pub fn trim_whitespace(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        return None;
    }
    Some(trimmed.to_string())
}
