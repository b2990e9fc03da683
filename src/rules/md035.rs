//! MD035 - Horizontal rule style

use crate::parser::{find_all_in, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD035;

impl Rule for MD035 {
    fn names(&self) -> &[&'static str] {
        &["MD035", "hr-style"]
    }

    fn description(&self) -> &'static str {
        "Horizontal rule style"
    }

    fn tags(&self) -> &[&'static str] {
        &["hr"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md035.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        // Get the style configuration, default to "consistent"
        let mut style = params
            .config
            .get("style")
            .and_then(|v| v.as_str())
            .unwrap_or("consistent")
            .trim()
            .to_string();

        let mut thematic_breaks = find_all_in(params.tokens, TokenKind::ThematicBreak);
        thematic_breaks.sort_by_key(|t| t.start_line());

        for token in thematic_breaks {
            let line_number = token.start_line();
            let text = &token.text;

            // If style is "consistent", use the first horizontal rule as the style
            if style == "consistent" {
                style = text.clone();
            }

            // Check if the current horizontal rule matches the expected style
            if text != &style {
                errors.push(Violation {
                    line: line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: Some(format!("Expected: {}; Actual: {}", style, text)),
                    error_context: Some(text.clone()),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(1),
                    length: Some(text.len()),
                    fix_info: Some(FixInfo {
                        line_number: Some(line_number),
                        edit_column: Some(1),
                        delete_length: Some(text.len() as i64),
                        replace_text: Some(style.clone()),
                    }),
                    suggestion: Some("Use a consistent horizontal rule style".to_string()),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
