//! MD024 - Multiple headings with the same content

use crate::parser::{find_all_in, Token, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD024;

impl Rule for MD024 {
    fn names(&self) -> &'static [&'static str] {
        &["MD024", "no-duplicate-heading", "no-duplicate-header"]
    }

    fn description(&self) -> &'static str {
        "Multiple headings with the same content"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "headers", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md024.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut heading_counts: std::collections::HashMap<String, usize> =
            std::collections::HashMap::new();
        let mut headings: Vec<&Token> = find_all_in(params.tokens, TokenKind::AtxHeading)
            .into_iter()
            .chain(find_all_in(params.tokens, TokenKind::SetextHeading))
            .collect();
        headings.sort_by_key(|t| t.start_line());

        for heading in headings {
            let normalized = heading.text.trim();

            if !normalized.is_empty() {
                let count = heading_counts.entry(normalized.to_string()).or_insert(0);
                *count += 1;

                // If this is a duplicate (count > 1), report error with fix
                if *count > 1 {
                    let line_number = heading.start_line();
                    let line = &params.lines[line_number - 1];

                    // Find the heading text in the line
                    let heading_start = line.find(normalized);
                    if let Some(start_pos) = heading_start {
                        // Calculate fix: append " (N)" to the heading
                        let new_text = format!("{} ({})", normalized, count);
                        let edit_column = start_pos + normalized.len() + 1; // 1-based

                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some(format!(
                                "Duplicate heading: '{}' (occurrence #{})",
                                normalized, count
                            )),
                            error_context: Some(normalized.to_string()),
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: None,
                            length: None,
                            fix_info: Some(FixInfo {
                                line_number: None,
                                edit_column: Some(edit_column),
                                delete_length: None,
                                replace_text: Some(format!(" ({})", count)),
                            }),
                            suggestion: Some(format!(
                                "Disambiguate by appending a number: '{}'",
                                new_text
                            )),
                            severity: Severity::Error,
                        });
                    }
                }
            }
        }

        errors
    }
}
