//! MD004 - Unordered list style
//!
//! This rule checks that unordered list markers are consistent throughout the document.
//! Supported styles:
//! - `asterisk`: All markers should be `*`
//! - `dash`: All markers should be `-`
//! - `plus`: All markers should be `+`
//! - `consistent`: All markers should be the same (default)
//! - `sublist`: Sublists should use a different marker than their parent

use crate::parser::{Token, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use std::collections::HashMap;

pub struct MD004;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    Asterisk,
    Dash,
    Plus,
    Consistent,
    Sublist,
}

impl ListStyle {
    fn from_str(s: &str) -> Self {
        match s {
            "asterisk" => ListStyle::Asterisk,
            "dash" => ListStyle::Dash,
            "plus" => ListStyle::Plus,
            "sublist" => ListStyle::Sublist,
            _ => ListStyle::Consistent,
        }
    }

    fn to_marker(self) -> char {
        match self {
            ListStyle::Asterisk => '*',
            ListStyle::Dash => '-',
            ListStyle::Plus => '+',
            ListStyle::Consistent | ListStyle::Sublist => '-', // Default fallback
        }
    }

    fn to_str(self) -> &'static str {
        match self {
            ListStyle::Asterisk => "asterisk",
            ListStyle::Dash => "dash",
            ListStyle::Plus => "plus",
            ListStyle::Consistent => "consistent",
            ListStyle::Sublist => "sublist",
        }
    }
}

fn marker_to_style(marker: char) -> ListStyle {
    match marker {
        '*' => ListStyle::Asterisk,
        '-' => ListStyle::Dash,
        '+' => ListStyle::Plus,
        _ => ListStyle::Dash, // Default fallback
    }
}

fn different_item_style(style: ListStyle) -> ListStyle {
    match style {
        ListStyle::Dash => ListStyle::Plus,
        ListStyle::Plus => ListStyle::Asterisk,
        ListStyle::Asterisk => ListStyle::Dash,
        _ => ListStyle::Dash,
    }
}

/// Extract the list marker character from a line
fn get_list_marker(line: &str) -> Option<char> {
    let trimmed = line.trim_start();
    if let Some(first_char) = trimmed.chars().next()
        && matches!(first_char, '*' | '-' | '+')
    {
        // Make sure it's followed by whitespace (to distinguish from other uses of these chars)
        if trimmed.len() > 1 {
            let second_char = trimmed.chars().nth(1)?;
            if second_char.is_whitespace() {
                return Some(first_char);
            }
        }
    }
    None
}

/// Walk the token tree collecting unordered list items paired with their
/// nesting depth (0 = top-level list). Document order is preserved since
/// children are visited in array order.
fn collect_list_items<'a>(tokens: &'a [Token], depth: usize, out: &mut Vec<(&'a Token, usize)>) {
    for token in tokens {
        if token.kind == TokenKind::List {
            for child in &token.children {
                if child.kind == TokenKind::ListItem {
                    out.push((child, depth));
                    collect_list_items(&child.children, depth + 1, out);
                } else {
                    collect_list_items(std::slice::from_ref(child), depth, out);
                }
            }
        } else {
            collect_list_items(&token.children, depth, out);
        }
    }
}

impl Rule for MD004 {
    fn names(&self) -> &[&'static str] {
        &["MD004", "ul-style"]
    }

    fn description(&self) -> &'static str {
        "Unordered list style"
    }

    fn tags(&self) -> &[&'static str] {
        &["bullet", "ul"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md004.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        // Get style from config
        let style = params
            .config
            .get("style")
            .and_then(|v| v.as_str())
            .map(ListStyle::from_str)
            .unwrap_or(ListStyle::Consistent);

        let mut expected_style = style;
        let mut nesting_styles: HashMap<usize, ListStyle> = HashMap::new();

        // Find all list items, paired with their nesting depth
        let mut list_items = Vec::new();
        collect_list_items(params.tokens, 0, &mut list_items);

        for (item, nesting) in list_items {
            // Only process unordered lists - check by looking at the actual marker in the line
            if item.start_line() == 0 || item.start_line() > params.lines.len() {
                continue;
            }

            let line = &params.lines[item.start_line() - 1];

            // Extract the marker from the line
            if let Some(marker) = get_list_marker(line) {
                let item_style = marker_to_style(marker);

                // Handle sublist style
                let nesting = if style == ListStyle::Sublist { nesting } else { 0 };

                if style == ListStyle::Sublist {
                    // Get or set expected style for this nesting level
                    if let Some(&nested_expected) = nesting_styles.get(&nesting) {
                        expected_style = nested_expected;
                    } else {
                        // Set expected style for this level
                        expected_style = if nesting > 0 {
                            // Check parent level
                            if let Some(&parent_style) = nesting_styles.get(&(nesting - 1)) {
                                if item_style == parent_style {
                                    different_item_style(item_style)
                                } else {
                                    item_style
                                }
                            } else {
                                item_style
                            }
                        } else {
                            item_style
                        };
                        nesting_styles.insert(nesting, expected_style);
                    }
                } else if expected_style == ListStyle::Consistent {
                    // Set the expected style to the first item's style
                    expected_style = item_style;
                }

                // Check if the item matches expected style
                if item_style != expected_style {
                    // Find the column where the marker appears
                    let marker_pos = line
                        .chars()
                        .position(|c| matches!(c, '*' | '-' | '+'))
                        .unwrap_or(0);
                    let column = marker_pos + 1;

                    errors.push(Violation {
                        line: item.start_line(),
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some(format!(
                            "Expected: {}; Actual: {}",
                            expected_style.to_str(),
                            item_style.to_str()
                        )),
                        error_context: Some(format!("{}", marker)),
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: Some(column),
                        length: Some(1),
                        fix_info: Some(FixInfo {
                            line_number: None,
                            edit_column: Some(column),
                            delete_length: Some(1),
                            replace_text: Some(expected_style.to_marker().to_string()),
                        }),
                        severity: Severity::Error,
                        suggestion: Some("Use a consistent unordered list marker style".to_string()),
                    });
                }
            }
        }

        errors
    }
}
