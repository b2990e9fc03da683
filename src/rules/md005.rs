//! MD005 - Inconsistent indentation for list items at the same level
//!
//! This rule checks for inconsistent indentation for list items at the same level.
//! For unordered lists, all items at the same level must start at the same column.
//! For ordered lists, either all items must start at the same column, or all items
//! must have their markers right-aligned (end at the same column).
//!
//! Note: Auto-fix is only supported for ordered lists. For unordered lists,
//! use MD007 (ul-indent) which handles indentation correction more precisely.

use crate::parser::{Token, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( *)(\d+)([.)])( +|$)").unwrap());
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( *)([*+-])( +|$)").unwrap());

pub struct MD005;

/// A list item's marker position, derived lexically from its source line
/// since the token tree does not retain exact column offsets.
struct ItemPrefix {
    line_number: usize,
    indent: usize,
    /// Column (1-based) immediately after the marker and its trailing gap.
    content_start: usize,
    marker_len: usize,
}

fn parse_item_prefix(line_number: usize, line: &str, ordered: bool) -> Option<ItemPrefix> {
    let caps = if ordered {
        ORDERED_PREFIX.captures(line)?
    } else {
        BULLET_PREFIX.captures(line)?
    };
    let indent = caps[1].len();
    let marker_len = if ordered {
        caps[2].len() + caps[3].len()
    } else {
        caps[2].len()
    };
    let gap = caps.get(if ordered { 4 } else { 3 })
        .map(|m| m.as_str().len())
        .unwrap_or(0)
        .max(1);
    Some(ItemPrefix {
        line_number,
        indent,
        content_start: indent + marker_len + gap + 1,
        marker_len,
    })
}

/// Walk the token tree collecting `(list, item_prefixes)` pairs for every
/// list, recursing into nested lists as separate groups.
fn collect_lists<'a>(
    tokens: &'a [Token],
    lines: &[&str],
    out: &mut Vec<(&'a Token, Vec<ItemPrefix>)>,
) {
    for token in tokens {
        if token.kind == TokenKind::List {
            let ordered = token.prop_bool("ordered").unwrap_or(false);
            let mut prefixes = Vec::new();
            for item in token.children_of_kind(TokenKind::ListItem) {
                let line_number = item.start_line();
                if let Some(line) = lines.get(line_number - 1) {
                    if let Some(prefix) = parse_item_prefix(line_number, line, ordered) {
                        prefixes.push(prefix);
                    }
                }
                collect_lists(&item.children, lines, out);
            }
            out.push((token, prefixes));
        } else {
            collect_lists(&token.children, lines, out);
        }
    }
}

impl Rule for MD005 {
    fn names(&self) -> &'static [&'static str] {
        &["MD005", "list-indent"]
    }

    fn description(&self) -> &'static str {
        "Inconsistent indentation for list items at the same level"
    }

    fn tags(&self) -> &[&'static str] {
        &["bullet", "ul", "indentation"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md005.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        let mut lists = Vec::new();
        collect_lists(params.tokens, params.lines, &mut lists);

        for (list, prefixes) in lists {
            if prefixes.is_empty() {
                continue;
            }

            let ordered = list.prop_bool("ordered").unwrap_or(false);
            let expected_indent = prefixes[0].indent;
            let mut expected_end = 0;
            let mut end_matching = false;

            for prefix in &prefixes {
                let line_number = prefix.line_number;
                let actual_indent = prefix.indent;
                let range = (1, prefix.content_start - 1);

                if !ordered {
                    // For unordered lists, check if indent matches expected
                    if expected_indent != actual_indent {
                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some(format!(
                                "Expected: {}; Actual: {}",
                                expected_indent, actual_indent
                            )),
                            error_context: None,
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: Some(range.0),
                            length: Some(range.1),
                            fix_info: None, // No fixInfo; MD007 handles this scenario better
                            suggestion: Some(
                                "Match list item indentation to previous items".to_string(),
                            ),
                            severity: Severity::Error,
                        });
                    }
                } else {
                    // For ordered lists, check for consistent indentation or right-aligned markers
                    let marker_length = prefix.marker_len;
                    let actual_end = actual_indent + marker_length;

                    // Set expected_end from first item if not set
                    if expected_end == 0 {
                        expected_end = actual_end;
                    }

                    if (expected_indent != actual_indent) || end_matching {
                        if expected_end == actual_end {
                            // Markers are right-aligned, switch to end-matching mode
                            end_matching = true;
                        } else {
                            // Generate appropriate error message
                            let (detail, expected, actual) = if end_matching {
                                (
                                    format!(
                                        "Expected: ({}); Actual: ({})",
                                        expected_end, actual_end
                                    ),
                                    expected_end - marker_length,
                                    actual_end - marker_length,
                                )
                            } else {
                                (
                                    format!(
                                        "Expected: {}; Actual: {}",
                                        expected_indent, actual_indent
                                    ),
                                    expected_indent,
                                    actual_indent,
                                )
                            };

                            errors.push(Violation {
                                line: line_number,
                                rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                                description: self.description().to_string(),
                                error_detail: Some(detail),
                                error_context: None,
                                documentation_url: self.information().map(|s| s.to_string()),
                                column: Some(range.0),
                                length: Some(range.1),
                                fix_info: Some(FixInfo {
                                    line_number: None,
                                    edit_column: Some(expected.min(actual) + 1),
                                    delete_length: Some((actual as i64 - expected as i64).max(0)),
                                    replace_text: if expected > actual {
                                        Some(" ".repeat(expected - actual))
                                    } else {
                                        None
                                    },
                                }),
                                suggestion: Some(
                                    "Match list item indentation to previous items".to_string(),
                                ),
                                severity: Severity::Error,
                            });
                        }
                    }
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Position, Range};
    use std::collections::HashMap;

    /// Builds a `List` token (ordered or unordered) whose `ListItem` children
    /// sit at the given 1-based line numbers. Indentation and marker shape
    /// are derived lexically from `lines` at lint time, so the token only
    /// needs to mark where each item starts.
    fn create_list(ordered: bool, item_lines: &[usize]) -> Token {
        let items: Vec<Token> = item_lines
            .iter()
            .map(|&line| {
                let start = Position::new(line - 1, 0, 0);
                let end = Position::new(line - 1, 10, 0);
                Token::new(TokenKind::ListItem, Range::new(start, end), String::new())
            })
            .collect();
        let start = items
            .first()
            .map(|t| t.range.start)
            .unwrap_or(Position::new(0, 0, 0));
        let end = items
            .last()
            .map(|t| t.range.end)
            .unwrap_or(Position::new(0, 0, 0));
        Token::new(TokenKind::List, Range::new(start, end), "")
            .with_property("ordered", ordered)
            .with_children(items)
    }

    #[test]
    fn test_md005_unordered_list_consistent() {
        let tokens = vec![create_list(false, &[1, 2, 3])];

        let lines = vec!["- Item 1\n", "- Item 2\n", "- Item 3\n"];

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

        let rule = MD005;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_md005_unordered_list_inconsistent() {
        let tokens = vec![create_list(false, &[1, 2, 3])];

        let lines = vec![
            "- Item 1\n",
            " - Item 2\n", // Extra space
            "- Item 3\n",
        ];

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

        let rule = MD005;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].error_detail.is_some());
        assert!(
            errors[0]
                .error_detail
                .as_ref()
                .unwrap()
                .contains("Expected: 0; Actual: 1")
        );
    }

    #[test]
    fn test_md005_ordered_list_consistent() {
        let tokens = vec![create_list(true, &[1, 2, 3])];

        let lines = vec!["1. Item 1\n", "2. Item 2\n", "3. Item 3\n"];

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

        let rule = MD005;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_md005_ordered_list_right_aligned() {
        let tokens = vec![create_list(true, &[1, 2, 3, 4])];

        let lines = vec![
            " 1. Item 1\n",
            " 2. Item 2\n",
            " 9. Item 9\n",
            "10. Item 10\n",
        ];

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

        let rule = MD005;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_md005_ordered_list_inconsistent() {
        let tokens = vec![create_list(true, &[1, 2, 3])];

        let lines = vec![
            "  1. Item 1\n",
            " 2. Item 2\n", // Less indented
            "  3. Item 3\n",
        ];

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

        let rule = MD005;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].fix_info.is_some());
    }

    #[test]
    fn test_md005_empty_list() {
        let tokens = vec![create_list(false, &[])];

        let lines = vec![""];

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

        let rule = MD005;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_md005_ordered_list_with_fix_info() {
        let tokens = vec![create_list(true, &[1, 2])];

        let lines = vec!["  1. Item 1\n", " 2. Item 2\n"];

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

        let rule = MD005;
        let errors = rule.lint(&params);
        assert_eq!(errors.len(), 1);

        let fix_info = errors[0].fix_info.as_ref().unwrap();
        assert_eq!(fix_info.edit_column, Some(2)); // Min of actual and expected + 1
        assert_eq!(fix_info.delete_length, Some(0));
        assert_eq!(fix_info.replace_text, Some(" ".to_string())); // Insert one space
    }
}
