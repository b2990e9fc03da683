//! MD020 - No space inside hashes on closed atx style heading

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD020;

impl Rule for MD020 {
    fn names(&self) -> &'static [&'static str] {
        &["MD020", "no-missing-space-closed-atx"]
    }

    fn description(&self) -> &'static str {
        "No space inside hashes on closed atx style heading"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "atx", "atx_closed", "spaces", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md020.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if trimmed.starts_with('#') && trimmed.ends_with('#') {
                let content = trimmed.trim_start_matches('#').trim_end_matches('#');
                if !content.is_empty() {
                    let has_start_space = content.starts_with(' ');
                    let has_end_space = content.ends_with(' ');

                    // Calculate positions for fix_info
                    let leading_hashes = trimmed.chars().take_while(|&c| c == '#').count();
                    let trailing_hashes = trimmed.chars().rev().take_while(|&c| c == '#').count();
                    let leading_ws = line.len() - line.trim_start().len();

                    if !has_start_space {
                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some("Missing space after opening #".to_string()),
                            error_context: Some(trimmed.to_string()),
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: None,
                            length: None,
                            fix_info: Some(FixInfo {
                                line_number: None,
                                edit_column: Some(leading_ws + leading_hashes + 1),
                                delete_length: None,
                                replace_text: Some(" ".to_string()),
                            }),
                            suggestion: Some("Add space after opening #".to_string()),
                            severity: Severity::Error,
                        });
                    }

                    if !has_end_space {
                        let content_end = trimmed.len() - trailing_hashes;
                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some("Missing space before closing #".to_string()),
                            error_context: Some(trimmed.to_string()),
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: None,
                            length: None,
                            fix_info: Some(FixInfo {
                                line_number: None,
                                edit_column: Some(leading_ws + content_end + 1),
                                delete_length: None,
                                replace_text: Some(" ".to_string()),
                            }),
                            suggestion: Some("Add space before closing #".to_string()),
                            severity: Severity::Error,
                        });
                    }
                }
            }
        }

        errors
    }
}
