//! MD058 - Tables should be surrounded by blank lines

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD058;

impl Rule for MD058 {
    fn names(&self) -> &'static [&'static str] {
        &["MD058", "blanks-around-tables"]
    }

    fn description(&self) -> &'static str {
        "Tables should be surrounded by blank lines"
    }

    fn tags(&self) -> &[&'static str] {
        &["table", "blank_lines", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md058.md")
    }

    /// Disabled by default (registered, but off unless explicitly enabled),
    /// matching the reference linter's defaults for MD058.
    fn is_enabled_by_default(&self) -> bool {
        false
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut table_start = 0;

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if trimmed.contains('|') && table_start == 0 {
                table_start = line_number;

                // Check for blank line before
                if line_number > 1 {
                    let prev_line = &params.lines[line_number - 2];
                    if !prev_line.trim().is_empty() {
                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some("Expected blank line before table".to_string()),
                            error_context: None,
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: None,
                            length: None,
                            fix_info: Some(FixInfo {
                                line_number: Some(line_number),
                                edit_column: Some(1),
                                delete_length: None,
                                replace_text: Some("\n".to_string()),
                            }),
                            suggestion: Some(
                                "Tables should be surrounded by blank lines".to_string(),
                            ),
                            severity: Severity::Error,
                        });
                    }
                }
            } else if !trimmed.contains('|') && table_start > 0 {
                // End of table
                if !trimmed.is_empty() {
                    let table_end_line = line_number - 1;
                    errors.push(Violation {
                        line: table_end_line,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some("Expected blank line after table".to_string()),
                        error_context: None,
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: None,
                        length: None,
                        fix_info: Some(FixInfo {
                            line_number: Some(line_number),
                            edit_column: Some(1),
                            delete_length: None,
                            replace_text: Some("\n".to_string()),
                        }),
                        suggestion: Some("Tables should be surrounded by blank lines".to_string()),
                        severity: Severity::Error,
                    });
                }
                table_start = 0;
            }
        }

        errors
    }
}
