//! MD001 - Heading levels should only increment by one level at a time
//!
//! This rule checks that heading levels only increment by one at a time.
//! For example, an h3 heading should not appear directly after an h1 heading.

use crate::parser::{find_all_in, Token, TokenKind};
use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use regex::Regex;

pub struct MD001;

impl MD001 {
    /// Get the heading level from a heading token's properties
    fn get_heading_level(heading: &Token) -> usize {
        heading.prop_usize("level").unwrap_or(1)
    }

    /// Check if front matter has a title field
    fn front_matter_has_title(
        front_matter_lines: &[&str],
        config: &std::collections::HashMap<String, serde_json::Value>,
    ) -> bool {
        // Get front_matter_title pattern from config, default to checking for "title:"
        let pattern = match config.get("front_matter_title") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::Bool(false)) => return false, // Ignore front matter
            _ => r#"^\s*"?title"?\s*[:=]"#.to_string(),
        };

        let re = match Regex::new(&format!("(?i){}", pattern)) {
            Ok(r) => r,
            Err(_) => return false,
        };

        front_matter_lines.iter().any(|line| re.is_match(line))
    }
}

impl Rule for MD001 {
    fn names(&self) -> &'static [&'static str] {
        &["MD001", "heading-increment"]
    }

    fn description(&self) -> &'static str {
        "Heading levels should only increment by one level at a time"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md001.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        // Check if front matter has a title (acts as implicit h1)
        let has_title = Self::front_matter_has_title(params.front_matter_lines, params.config);
        let mut prev_level = if has_title {
            1
        } else {
            usize::MAX // Start with max so first heading is always valid
        };

        // Walk ATX and setext headings together, in document order.
        let mut headings: Vec<(&Token, bool)> = find_all_in(params.tokens, TokenKind::AtxHeading)
            .into_iter()
            .map(|t| (t, false))
            .chain(
                find_all_in(params.tokens, TokenKind::SetextHeading)
                    .into_iter()
                    .map(|t| (t, true)),
            )
            .collect();
        headings.sort_by_key(|(t, _)| t.start_line());

        for (heading, is_setext) in headings {
            let level = Self::get_heading_level(heading);

            // Only report error if level increases by more than 1
            if level > prev_level.saturating_add(1) {
                let expected_level = prev_level + 1;

                // Generate fix_info to adjust the heading level
                let fix_info = if !is_setext {
                    // ATX heading: change the number of # characters
                    let line = params
                        .lines
                        .get(heading.start_line() - 1)
                        .copied()
                        .unwrap_or("");

                    // Find where the heading text starts (after leading # and spaces)
                    if let Some(hash_count) = line.find(|c| c != '#' && c != ' ') {
                        let new_prefix = "#".repeat(expected_level) + " ";
                        Some(FixInfo {
                            line_number: Some(heading.start_line()),
                            edit_column: Some(1),
                            delete_length: Some(hash_count as i64),
                            replace_text: Some(new_prefix),
                        })
                    } else {
                        None
                    }
                } else {
                    // Setext heading: convert to ATX format
                    // Replace both the heading line and the underline
                    let line = params
                        .lines
                        .get(heading.start_line() - 1)
                        .map(|s| s.trim_end())
                        .unwrap_or("");

                    let new_heading = format!("{} {}", "#".repeat(expected_level), line);
                    Some(FixInfo {
                        line_number: Some(heading.start_line()),
                        edit_column: Some(1),
                        delete_length: Some(-1), // Delete entire line (handled by apply_fixes)
                        replace_text: Some(new_heading),
                    })
                };

                errors.push(Violation {
                    line: heading.start_line(),
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: Some(format!(
                        "Expected: h{}; Actual: h{}",
                        expected_level, level
                    )),
                    error_context: None,
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: None,
                    length: None,
                    fix_info,
                    suggestion: Some(
                        "Heading levels should increment by one level at a time".to_string(),
                    ),
                    severity: Severity::Error,
                });
            }

            prev_level = level;
        }

        errors
    }
}
