use serde::Serialize;

/// A single normalization rule. Identifiers are stable and appear in the
/// JSON log returned to clients, so renaming a variant is a wire change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    LeftSingleQuote,
    RightSingleQuote,
    LeftDoubleQuote,
    RightDoubleQuote,
    EnDash,
    EmDash,
    Ellipsis,
    LineEndings,
    BlankLines,
    Trim,
}

impl Rule {
    /// Every rule, in the order the normalizer applies them.
    pub const ALL: [Rule; 10] = [
        Rule::LeftSingleQuote,
        Rule::RightSingleQuote,
        Rule::LeftDoubleQuote,
        Rule::RightDoubleQuote,
        Rule::EnDash,
        Rule::EmDash,
        Rule::Ellipsis,
        Rule::LineEndings,
        Rule::BlankLines,
        Rule::Trim,
    ];

    /// Human-readable description used in the normalization log.
    pub fn description(self) -> &'static str {
        match self {
            Rule::LeftSingleQuote => "Normalized left smart single quotes",
            Rule::RightSingleQuote => "Normalized right smart single quotes",
            Rule::LeftDoubleQuote => "Normalized left smart double quotes",
            Rule::RightDoubleQuote => "Normalized right smart double quotes",
            Rule::EnDash => "Replaced en dashes with hyphens",
            Rule::EmDash => "Replaced em dashes with double hyphens",
            Rule::Ellipsis => "Expanded ellipsis characters",
            Rule::LineEndings => "Normalized line endings to LF",
            Rule::BlankLines => "Collapsed excessive blank lines",
            Rule::Trim => "Trimmed leading and trailing whitespace",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rule::LeftSingleQuote => "left_single_quote",
            Rule::RightSingleQuote => "right_single_quote",
            Rule::LeftDoubleQuote => "left_double_quote",
            Rule::RightDoubleQuote => "right_double_quote",
            Rule::EnDash => "en_dash",
            Rule::EmDash => "em_dash",
            Rule::Ellipsis => "ellipsis",
            Rule::LineEndings => "line_endings",
            Rule::BlankLines => "blank_lines",
            Rule::Trim => "trim",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record that a rule changed the text. One per rule, never per occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationLogEntry {
    pub rule: Rule,
    pub description: &'static str,
}

impl From<Rule> for NormalizationLogEntry {
    fn from(rule: Rule) -> Self {
        Self {
            rule,
            description: rule.description(),
        }
    }
}

/// Output of [`super::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedText {
    pub clean_text: String,
    pub logs: Vec<NormalizationLogEntry>,
}

impl NormalizedText {
    /// Whether the given rule fired during normalization.
    pub fn fired(&self, rule: Rule) -> bool {
        self.logs.iter().any(|entry| entry.rule == rule)
    }
}

/// Catalog row describing a rule, independent of any input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub rule: Rule,
    pub description: &'static str,
}
