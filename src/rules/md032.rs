//! MD032 - Lists should be surrounded by blank lines

use crate::parser::{Token, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

pub struct MD032;

/// Check if a line is blank (empty or contains only whitespace/comments)
fn is_blank_line(line: &str) -> bool {
    let mut s = line.to_string();

    // Remove HTML comments (simplified version of the JS implementation)
    loop {
        let start_comment = "<!--";
        let end_comment = "-->";

        let start = s.find(start_comment);
        let end = s.find(end_comment);

        match (start, end) {
            (None, Some(end_pos)) => {
                // Unmatched end comment is first
                s = s[end_pos + end_comment.len()..].to_string();
            }
            (Some(start_pos), Some(end_pos)) if start_pos < end_pos => {
                // Start comment is before end comment
                s = format!("{}{}", &s[..start_pos], &s[end_pos + end_comment.len()..]);
            }
            (Some(start_pos), None) => {
                // Unmatched start comment is last
                s = s[..start_pos].to_string();
            }
            _ => break,
        }
    }

    // After removing comments, check if line is empty or contains only whitespace/angle brackets
    s.is_empty() || s.trim().is_empty() || s.replace('>', "").trim().is_empty()
}

static BLOCKQUOTE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[ \t]*>[ \t]?)*").unwrap());

/// Reconstruct the blockquote marker prefix (e.g. "> > ") for a line, so an inserted
/// blank line stays inside the same blockquote nesting.
fn blockquote_prefix(line: &str) -> String {
    let m = BLOCKQUOTE_PREFIX.find(line).map(|m| m.as_str()).unwrap_or("");
    format!("{}\n", m.trim_end())
}

/// Collect lists that are not nested inside another list or an HTML block.
fn collect_top_level_lists<'a>(tokens: &'a [Token], out: &mut Vec<&'a Token>) {
    for token in tokens {
        match token.kind {
            TokenKind::List => out.push(token),
            TokenKind::HtmlFlow => {}
            _ => collect_top_level_lists(&token.children, out),
        }
    }
}

impl Rule for MD032 {
    fn names(&self) -> &'static [&'static str] {
        &["MD032", "blanks-around-lists"]
    }

    fn description(&self) -> &'static str {
        "Lists should be surrounded by blank lines"
    }

    fn tags(&self) -> &[&'static str] {
        &["bullet", "ul", "ol", "blank_lines", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md032.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let lines = params.lines;

        let mut top_level_lists = Vec::new();
        collect_top_level_lists(params.tokens, &mut top_level_lists);

        for list in top_level_lists {
            let first_line_number = list.start_line();

            if first_line_number > 1 {
                let prev_line_idx = first_line_number - 2;
                if prev_line_idx < lines.len() && !is_blank_line(lines[prev_line_idx]) {
                    let context = if first_line_number - 1 < lines.len() {
                        lines[first_line_number - 1].trim().to_string()
                    } else {
                        String::new()
                    };

                    let replace_text = blockquote_prefix(lines[first_line_number - 1]);

                    errors.push(Violation {
                        line: first_line_number,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: None,
                        error_context: Some(context),
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: None,
                        length: None,
                        fix_info: Some(FixInfo {
                            line_number: Some(first_line_number),
                            edit_column: Some(1),
                            delete_length: None,
                            replace_text: Some(replace_text),
                        }),
                        suggestion: Some(
                            "Lists should be surrounded by blank lines".to_string(),
                        ),
                        severity: Severity::Error,
                    });
                }
            }

            let last_line_number = list.end_line();

            if last_line_number < lines.len() && !is_blank_line(lines[last_line_number]) {
                let context = if last_line_number > 0 && last_line_number - 1 < lines.len() {
                    lines[last_line_number - 1].trim().to_string()
                } else {
                    String::new()
                };

                let replace_text = if last_line_number > 0 && last_line_number - 1 < lines.len() {
                    blockquote_prefix(lines[last_line_number - 1])
                } else {
                    "\n".to_string()
                };

                errors.push(Violation {
                    line: last_line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: None,
                    error_context: Some(context),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: None,
                    length: None,
                    fix_info: Some(FixInfo {
                        line_number: Some(last_line_number + 1),
                        edit_column: Some(1),
                        delete_length: None,
                        replace_text: Some(replace_text),
                    }),
                    suggestion: Some("Lists should be surrounded by blank lines".to_string()),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
