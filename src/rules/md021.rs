//! MD021 - Multiple spaces inside hashes on closed atx style heading

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD021;

impl Rule for MD021 {
    fn names(&self) -> &'static [&'static str] {
        &["MD021", "no-multiple-space-closed-atx"]
    }

    fn description(&self) -> &'static str {
        "Multiple spaces inside hashes on closed atx style heading"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "atx", "atx_closed", "spaces", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md021.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if trimmed.starts_with('#') && trimmed.ends_with('#') {
                let content = trimmed.trim_start_matches('#').trim_end_matches('#');
                if !content.is_empty() {
                    let start_spaces = content.chars().take_while(|&c| c == ' ').count();
                    let end_spaces = content.chars().rev().take_while(|&c| c == ' ').count();

                    // Calculate positions for fix_info
                    let leading_hashes = trimmed.chars().take_while(|&c| c == '#').count();
                    let trailing_hashes = trimmed.chars().rev().take_while(|&c| c == '#').count();
                    let leading_ws = line.len() - line.trim_start().len();

                    if start_spaces > 1 {
                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some(format!("Expected: 1; Actual: {}", start_spaces)),
                            error_context: Some(trimmed.to_string()),
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: None,
                            length: None,
                            fix_info: Some(FixInfo {
                                line_number: None,
                                edit_column: Some(leading_ws + leading_hashes + 2), // After first space
                                delete_length: Some((start_spaces - 1) as i64),
                                replace_text: None,
                            }),
                            suggestion: Some("Remove extra spaces after opening #".to_string()),
                            severity: Severity::Error,
                        });
                    }

                    if end_spaces > 1 {
                        let content_end = trimmed.len() - trailing_hashes;
                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some(format!("Expected: 1; Actual: {}", end_spaces)),
                            error_context: Some(trimmed.to_string()),
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: None,
                            length: None,
                            fix_info: Some(FixInfo {
                                line_number: None,
                                edit_column: Some(leading_ws + content_end - end_spaces + 2), // After first space
                                delete_length: Some((end_spaces - 1) as i64),
                                replace_text: None,
                            }),
                            suggestion: Some("Remove extra spaces before closing #".to_string()),
                            severity: Severity::Error,
                        });
                    }
                }
            }
        }

        errors
    }
}
