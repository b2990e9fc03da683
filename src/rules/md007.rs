//! MD007 - Unordered list indentation
//!
//! This rule checks that unordered list items have consistent indentation.

use crate::parser::{Token, TokenKind};
use crate::types::{ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( *)").unwrap());

pub struct MD007;

fn expected_indent(level: usize, indent: usize, start_indent: usize, start_indented: bool) -> usize {
    if start_indented {
        start_indent + level * indent
    } else {
        level * indent
    }
}

/// Walk the token tree collecting unordered-list items along with their nesting depth.
/// Nesting counts every list (ordered or unordered) between a list item and the root,
/// matching how sibling bullet/number lists can be mixed within the same outline.
fn collect_unordered_items<'a>(tokens: &'a [Token], depth: usize, out: &mut Vec<(&'a Token, usize)>) {
    for token in tokens {
        if token.kind == TokenKind::List {
            let ordered = token.prop_bool("ordered").unwrap_or(false);
            for child in &token.children {
                if child.kind == TokenKind::ListItem {
                    if !ordered {
                        out.push((child, depth));
                    }
                    collect_unordered_items(&child.children, depth + 1, out);
                } else {
                    collect_unordered_items(std::slice::from_ref(child), depth, out);
                }
            }
        } else {
            collect_unordered_items(&token.children, depth, out);
        }
    }
}

impl Rule for MD007 {
    fn names(&self) -> &[&'static str] {
        &["MD007", "ul-indent"]
    }

    fn description(&self) -> &'static str {
        "Unordered list indentation"
    }

    fn tags(&self) -> &[&'static str] {
        &["bullet", "ul", "indentation"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md007.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        let indent = params
            .config
            .get("indent")
            .and_then(|v| v.as_u64())
            .unwrap_or(2) as usize;

        let start_indented = params
            .config
            .get("start_indented")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let start_indent = params
            .config
            .get("start_indent")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(indent);

        let mut items = Vec::new();
        collect_unordered_items(params.tokens, 0, &mut items);

        for (item, level) in items {
            let line_number = item.start_line();
            if line_number == 0 || line_number > params.lines.len() {
                continue;
            }
            let line = params.lines[line_number - 1];
            let actual_indent = LEADING_SPACES
                .captures(line)
                .map(|caps| caps[1].len())
                .unwrap_or(0);

            let expected = expected_indent(level, indent, start_indent, start_indented);

            if actual_indent != expected {
                errors.push(Violation {
                    line: line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: Some(format!(
                        "Expected: {}; Actual: {}",
                        expected, actual_indent
                    )),
                    error_context: None,
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(1),
                    length: Some(actual_indent.max(1)),
                    fix_info: None,
                    suggestion: Some(format!(
                        "Indent this list item by {} space{}",
                        expected,
                        if expected == 1 { "" } else { "s" }
                    )),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
