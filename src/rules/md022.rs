//! MD022 - Headings should be surrounded by blank lines

use crate::parser::{find_all_in, Token, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD022;

impl Rule for MD022 {
    fn names(&self) -> &[&'static str] {
        &["MD022", "blanks-around-headings", "blanks-around-headers"]
    }

    fn description(&self) -> &'static str {
        "Headings should be surrounded by blank lines"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "headers", "blank_lines", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md022.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut headings: Vec<&Token> = find_all_in(params.tokens, TokenKind::AtxHeading)
            .into_iter()
            .chain(find_all_in(params.tokens, TokenKind::SetextHeading))
            .collect();
        headings.sort_by_key(|t| t.start_line());

        for heading in headings {
            let line_num = heading.start_line();

            // Check line before heading
            if line_num > 1 {
                let prev_line = &params.lines[line_num - 2];
                if !prev_line.trim().is_empty() {
                    errors.push(Violation {
                        line: line_num,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some("Expected blank line before heading".to_string()),
                        error_context: None,
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: None,
                        length: None,
                        fix_info: Some(FixInfo {
                            line_number: Some(line_num),
                            edit_column: Some(1),
                            delete_length: None,
                            replace_text: Some("\n".to_string()),
                        }),
                        suggestion: Some(
                            "Headings should be surrounded by blank lines".to_string(),
                        ),
                        severity: Severity::Error,
                    });
                }
            }

            // Check line after heading
            if line_num < params.lines.len() {
                let next_line = &params.lines[line_num];
                if !next_line.trim().is_empty() {
                    errors.push(Violation {
                        line: line_num,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some("Expected blank line after heading".to_string()),
                        error_context: None,
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: None,
                        length: None,
                        fix_info: Some(FixInfo {
                            line_number: Some(line_num + 1),
                            edit_column: Some(1),
                            delete_length: None,
                            replace_text: Some("\n".to_string()),
                        }),
                        suggestion: Some(
                            "Headings should be surrounded by blank lines".to_string(),
                        ),
                        severity: Severity::Error,
                    });
                }
            }
        }

        errors
    }
}
