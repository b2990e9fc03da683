//! MD052 - Reference links and images should use a label that is defined

use crate::types::{ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Regex for reference link definitions: `[label]: url`
static DEF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[([^\]]+)\]:\s+").unwrap());

/// Regex for full reference links: `[text][label]`
static FULL_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\[([^\]]+)\]").unwrap());

/// Regex for collapsed reference links: `[label][]`
static COLLAPSED_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\[\]").unwrap());

pub struct MD052;

/// Check if a line is a code fence opener/closer (``` or ~~~)
fn is_code_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

impl Rule for MD052 {
    fn names(&self) -> &'static [&'static str] {
        &["MD052", "reference-links-images"]
    }

    fn description(&self) -> &'static str {
        "Reference links and images should use a label that is defined"
    }

    fn tags(&self) -> &[&'static str] {
        &["links", "images", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md052.md")
    }

    /// Disabled by default (registered, but off unless explicitly enabled),
    /// matching the reference linter's defaults for MD052.
    fn is_enabled_by_default(&self) -> bool {
        false
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut defined_labels: HashSet<String> = HashSet::new();

        // Pass 1: Collect all reference definitions (skipping code blocks)
        let mut in_code_block = false;
        for line in params.lines.iter() {
            if is_code_fence(line) {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                continue;
            }

            if let Some(caps) = DEF_RE.captures(line) {
                let label = caps[1].to_lowercase();
                defined_labels.insert(label);
            }
        }

        // Pass 2: Find all reference usages and check if they are defined
        in_code_block = false;
        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            if is_code_fence(line) {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                continue;
            }

            // Check full reference links: [text][label]
            for caps in FULL_REF_RE.captures_iter(line) {
                let label = caps[2].to_lowercase();
                if !defined_labels.contains(&label) {
                    // Append to the last non-empty line
                    // Note: apply_fixes pops trailing empty lines (lines that are just "\n" or "\r\n")
                    // so we need to target the line before it if it exists
                    let last_line_idx = params.lines.len().saturating_sub(1);
                    let is_trailing_empty = params
                        .lines
                        .get(last_line_idx)
                        .map(|l| *l == "\n" || *l == "\r\n")
                        .unwrap_or(false);
                    let insert_line = if is_trailing_empty {
                        last_line_idx.max(1) // Target line before trailing empty
                    } else {
                        params.lines.len() // Target the actual last line
                    };
                    let target_line = params.lines.get(insert_line - 1).copied().unwrap_or("");
                    let target_stripped = target_line.trim_end_matches('\n').trim_end_matches('\r');
                    let insert_col = target_stripped.len() + 1;

                    errors.push(Violation {
                        line: line_number,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some(format!(
                            "Reference label \"{}\" is not defined",
                            &caps[2]
                        )),
                        error_context: Some(caps[0].to_string()),
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: None,
                        length: None,
                        fix_info: Some(crate::types::FixInfo {
                            line_number: Some(insert_line),
                            edit_column: Some(insert_col),
                            delete_length: None,
                            replace_text: Some(format!("\n[{}]: #link\n", &caps[2])),
                        }),
                        suggestion: Some(
                            "Define all link reference labels that are used".to_string(),
                        ),
                        severity: Severity::Error,
                    });
                }
            }

            // Check collapsed reference links: [label][]
            for caps in COLLAPSED_REF_RE.captures_iter(line) {
                let label = caps[1].to_lowercase();
                if !defined_labels.contains(&label) {
                    // Append to the last non-empty line
                    // Note: apply_fixes pops trailing empty lines (lines that are just "\n" or "\r\n")
                    // so we need to target the line before it if it exists
                    let last_line_idx = params.lines.len().saturating_sub(1);
                    let is_trailing_empty = params
                        .lines
                        .get(last_line_idx)
                        .map(|l| *l == "\n" || *l == "\r\n")
                        .unwrap_or(false);
                    let insert_line = if is_trailing_empty {
                        last_line_idx.max(1) // Target line before trailing empty
                    } else {
                        params.lines.len() // Target the actual last line
                    };
                    let target_line = params.lines.get(insert_line - 1).copied().unwrap_or("");
                    let target_stripped = target_line.trim_end_matches('\n').trim_end_matches('\r');
                    let insert_col = target_stripped.len() + 1;

                    errors.push(Violation {
                        line: line_number,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some(format!(
                            "Reference label \"{}\" is not defined",
                            &caps[1]
                        )),
                        error_context: Some(caps[0].to_string()),
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: None,
                        length: None,
                        fix_info: Some(crate::types::FixInfo {
                            line_number: Some(insert_line),
                            edit_column: Some(insert_col),
                            delete_length: None,
                            replace_text: Some(format!("\n[{}]: #link\n", &caps[1])),
                        }),
                        suggestion: Some(
                            "Define all link reference labels that are used".to_string(),
                        ),
                        severity: Severity::Error,
                    });
                }
            }
        }

        errors
    }
}
