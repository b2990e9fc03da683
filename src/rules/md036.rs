//! MD036 - Emphasis used instead of a heading
//!
//! This rule detects when emphasis (bold or italic) is used for what should be a heading.
//! It looks for single-line paragraphs that consist entirely of emphasized text and don't
//! end with punctuation.
//!
//! ## Parameters
//!
//! - `punctuation`: Characters to treat as punctuation (default: `.,;:!?。，；：！？`)

use crate::parser::{find_all_in, Token, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD036;

/// Default punctuation characters
const ALL_PUNCTUATION: &str = ".,;:!?。，；：！？";

/// Check if a paragraph child token is meaningful (not inline HTML or blank text)
fn is_paragraph_child_meaningful(token: &Token) -> bool {
    !(token.kind == TokenKind::HtmlText
        || (token.kind == TokenKind::Text && token.text.trim().is_empty()))
}

impl Rule for MD036 {
    fn names(&self) -> &[&'static str] {
        &["MD036", "no-emphasis-as-heading"]
    }

    fn description(&self) -> &'static str {
        "Emphasis used instead of a heading"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "emphasis", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md036.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        // Get punctuation from config or use default
        let punctuation = params
            .config
            .get("punctuation")
            .and_then(|v| v.as_str())
            .unwrap_or(ALL_PUNCTUATION);

        // Create regex pattern to match punctuation at end of string
        let punctuation_pattern = format!("[{}]$", regex::escape(punctuation));
        let punctuation_re = match regex::Regex::new(&punctuation_pattern) {
            Ok(re) => re,
            Err(_) => return errors, // Return empty if regex fails
        };

        let paragraphs = find_all_in(params.tokens, TokenKind::Paragraph);

        // A paragraph is a heading candidate when it consists of exactly one
        // meaningful inline child (ignoring inline HTML and blank text runs).
        let candidates: Vec<&Token> = paragraphs
            .into_iter()
            .filter(|para| {
                let meaningful: Vec<&Token> = para
                    .children
                    .iter()
                    .filter(|child| is_paragraph_child_meaningful(child))
                    .collect();
                meaningful.len() == 1
            })
            .collect();

        for paragraph in candidates {
            let Some(emphasis_token) = paragraph
                .children
                .iter()
                .find(|child| is_paragraph_child_meaningful(child))
            else {
                continue;
            };

            if !matches!(emphasis_token.kind, TokenKind::Emphasis | TokenKind::Strong) {
                continue;
            }

            // The emphasis run must wrap plain text only (no nested markup).
            if emphasis_token.children.len() != 1 {
                continue;
            }
            if emphasis_token.children[0].kind != TokenKind::Text {
                continue;
            }
            if punctuation_re.is_match(&emphasis_token.text) {
                continue;
            }

            let start_col = emphasis_token.range.start.column + 1;
            let end_col = emphasis_token.range.end.column + 1;
            let total_len = end_col.saturating_sub(start_col);

            let fix_info = Some(FixInfo {
                line_number: None,
                edit_column: Some(start_col),
                delete_length: Some(total_len as i64),
                replace_text: Some(format!("## {}", emphasis_token.text)),
            });

            errors.push(Violation {
                line: emphasis_token.start_line(),
                rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                description: self.description().to_string(),
                error_detail: None,
                error_context: Some(emphasis_token.text.clone()),
                documentation_url: self.information().map(|s| s.to_string()),
                column: None,
                length: None,
                fix_info,
                suggestion: Some(
                    "Use a heading instead of emphasized text to introduce a section"
                        .to_string(),
                ),
                severity: Severity::Error,
            });
        }

        errors
    }
}
