//! MD012 - Multiple consecutive blank lines
//!
//! This rule checks for multiple consecutive blank lines.

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD012;

impl Rule for MD012 {
    fn names(&self) -> &'static [&'static str] {
        &["MD012", "no-multiple-blanks"]
    }

    fn description(&self) -> &'static str {
        "Multiple consecutive blank lines"
    }

    fn tags(&self) -> &[&'static str] {
        &["whitespace", "blank_lines", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md012.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut blank_count = 0;
        let mut first_blank_line = 0;

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                if blank_count == 0 {
                    first_blank_line = line_number;
                }
                blank_count += 1;
            } else {
                // We hit a non-blank line
                if blank_count > 1 {
                    // Report error on the line after the first blank
                    errors.push(Violation {
                        line: first_blank_line + 1,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some(format!("Expected: 1; Actual: {}", blank_count)),
                        error_context: None,
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: None,
                        length: None,
                        fix_info: Some(FixInfo {
                            line_number: Some(first_blank_line + 1),
                            edit_column: Some(1),
                            delete_length: Some(-1), // Delete entire line
                            replace_text: None,
                        }),
                        suggestion: Some("Remove consecutive blank lines".to_string()),
                        severity: Severity::Error,
                    });
                }
                blank_count = 0;
            }
        }

        // Check if file ends with multiple blanks
        if blank_count > 1 {
            errors.push(Violation {
                line: first_blank_line + 1,
                rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                description: self.description().to_string(),
                error_detail: Some(format!("Expected: 1; Actual: {}", blank_count)),
                error_context: None,
                documentation_url: self.information().map(|s| s.to_string()),
                column: None,
                length: None,
                fix_info: Some(FixInfo {
                    line_number: Some(first_blank_line + 1),
                    edit_column: Some(1),
                    delete_length: Some(-1),
                    replace_text: None,
                }),
                suggestion: Some("Remove consecutive blank lines".to_string()),
                severity: Severity::Error,
            });
        }

        errors
    }
}
