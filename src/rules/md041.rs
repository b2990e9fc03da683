//! MD041 - First line in a file should be a top-level heading
//!
//! This rule checks that the first line of the file is a top-level (h1) heading.

use crate::parser::{find_all_in, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD041;

impl Rule for MD041 {
    fn names(&self) -> &'static [&'static str] {
        &["MD041", "first-line-heading", "first-line-h1"]
    }

    fn description(&self) -> &'static str {
        "First line in a file should be a top-level heading"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md041.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        // Skip empty files
        if params.lines.is_empty() {
            return errors;
        }

        // Skip front matter
        let first_content_line = if !params.front_matter_lines.is_empty() {
            params.front_matter_lines.len() + 1
        } else {
            1
        };

        // Find the first heading
        let mut headings: Vec<_> = find_all_in(params.tokens, TokenKind::AtxHeading)
            .into_iter()
            .chain(find_all_in(params.tokens, TokenKind::SetextHeading))
            .collect();
        headings.sort_by_key(|t| t.start_line());

        if let Some(first_heading) = headings.first() {
            // Check if first heading is on the first content line
            if first_heading.start_line() != first_content_line {
                // Fix: insert a heading before the current content
                errors.push(Violation {
                    line: first_content_line,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: None,
                    error_context: None,
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: None,
                    length: None,
                    fix_info: Some(FixInfo {
                        line_number: Some(first_content_line),
                        edit_column: Some(1),
                        delete_length: None,
                        replace_text: Some("# Title\n\n".to_string()),
                    }),
                    suggestion: Some(
                        "Start your document with a top-level heading (# Title)".to_string(),
                    ),
                    severity: Severity::Error,
                });
            }
        } else {
            // No heading found - insert one at the beginning
            errors.push(Violation {
                line: first_content_line,
                rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                description: self.description().to_string(),
                error_detail: None,
                error_context: None,
                documentation_url: self.information().map(|s| s.to_string()),
                column: None,
                length: None,
                fix_info: Some(FixInfo {
                    line_number: Some(first_content_line),
                    edit_column: Some(1),
                    delete_length: None,
                    replace_text: Some("# Title\n\n".to_string()),
                }),
                suggestion: Some("Add a top-level heading as the first line".to_string()),
                severity: Severity::Error,
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Position, Range, Token};
    use std::collections::HashMap;

    fn make_heading(line: usize, text: &str) -> Token {
        let start = Position::new(line - 1, 0, 0);
        let end = Position::new(line - 1, text.len(), 0);
        Token::new(TokenKind::AtxHeading, Range::new(start, end), text)
            .with_property("level", 1u64)
    }

    #[test]
    fn test_md041_starts_with_heading() {
        let tokens = vec![make_heading(1, "Heading")];

        let lines = vec!["# Heading\n"];

        let params = RuleParams {
            name: "test.md",
            version: "0.1.0",
            lines: &lines,
            front_matter_lines: &[],
            front_matter: None,
            tokens: &tokens,
            config: &HashMap::new(),
            workspace_headings: None,
        };

        let rule = MD041;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_md041_no_heading() {
        let tokens = vec![];
        let lines = vec!["Just some text\n"];

        let params = RuleParams {
            name: "test.md",
            version: "0.1.0",
            lines: &lines,
            front_matter_lines: &[],
            front_matter: None,
            tokens: &tokens,
            config: &HashMap::new(),
            workspace_headings: None,
        };

        let rule = MD041;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_md041_heading_not_first() {
        let tokens = vec![make_heading(3, "Heading")];

        let lines = vec!["Some text\n", "\n", "# Heading\n"];

        let params = RuleParams {
            name: "test.md",
            version: "0.1.0",
            lines: &lines,
            front_matter_lines: &[],
            front_matter: None,
            tokens: &tokens,
            config: &HashMap::new(),
            workspace_headings: None,
        };

        let rule = MD041;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_md041_fix_info_no_heading() {
        let tokens = vec![];
        let lines = vec!["Just some text\n"];

        let params = RuleParams {
            name: "test.md",
            version: "0.1.0",
            lines: &lines,
            front_matter_lines: &[],
            front_matter: None,
            tokens: &tokens,
            config: &HashMap::new(),
            workspace_headings: None,
        };

        let rule = MD041;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].fix_info.is_some());
        let fix = errors[0].fix_info.as_ref().unwrap();
        assert_eq!(fix.line_number, Some(1));
        assert_eq!(fix.replace_text, Some("# Title\n\n".to_string()));
    }

    #[test]
    fn test_md041_fix_info_heading_not_first() {
        let tokens = vec![make_heading(3, "Heading")];

        let lines = vec!["Some text\n", "\n", "# Heading\n"];

        let params = RuleParams {
            name: "test.md",
            version: "0.1.0",
            lines: &lines,
            front_matter_lines: &[],
            front_matter: None,
            tokens: &tokens,
            config: &HashMap::new(),
            workspace_headings: None,
        };

        let rule = MD041;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].fix_info.is_some());
    }
}
