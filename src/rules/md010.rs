//! MD010 - Hard tabs
//!
//! This rule checks for hard tab characters instead of spaces.

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD010;

impl Rule for MD010 {
    fn names(&self) -> &'static [&'static str] {
        &["MD010", "no-hard-tabs"]
    }

    fn description(&self) -> &'static str {
        "Hard tabs"
    }

    fn tags(&self) -> &[&'static str] {
        &["whitespace", "hard_tab", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md010.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            // Find all tab characters in the line
            let mut column = 1;
            for ch in line.chars() {
                if ch == '\t' {
                    errors.push(Violation {
                        line: line_number,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some(format!("Column: {}", column)),
                        error_context: None,
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: Some(column),
                        length: Some(1),
                        fix_info: Some(FixInfo {
                            line_number: None,
                            edit_column: Some(column),
                            delete_length: Some(1),
                            replace_text: Some("    ".to_string()), // Replace with 4 spaces
                        }),
                        suggestion: Some("Replace hard tabs with spaces".to_string()),
                        severity: Severity::Error,
                    });
                }
                column += 1;

                // Stop at newline
                if ch == '\n' || ch == '\r' {
                    break;
                }
            }
        }

        errors
    }
}
