//! MD014 - Dollar signs used before commands without showing output
//!
//! This rule checks for code blocks that show commands with $ prefix

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD014;

impl Rule for MD014 {
    fn names(&self) -> &[&'static str] {
        &["MD014", "commands-show-output"]
    }

    fn description(&self) -> &'static str {
        "Dollar signs used before commands without showing output"
    }

    fn tags(&self) -> &[&'static str] {
        &["code", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md014.md")
    }

    /// Disabled by default (registered, but off unless explicitly enabled),
    /// matching the reference linter's defaults for MD014.
    fn is_enabled_by_default(&self) -> bool {
        false
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut in_code_block = false;
        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_code_block = !in_code_block;
            } else if in_code_block && trimmed.starts_with('$') {
                // Calculate position and deletion count
                let leading_ws = line.len() - line.trim_start().len();
                let dollar_pos = leading_ws + 1; // 1-based column

                // Check if there's a space after $
                let delete_length = if trimmed.len() > 1 && trimmed.chars().nth(1) == Some(' ') {
                    2 // Delete "$ "
                } else {
                    1 // Delete "$"
                };

                errors.push(Violation {
                    line: line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: None,
                    error_context: Some(trimmed.to_string()),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(1),
                    length: Some(line.len()),
                    fix_info: Some(FixInfo {
                        line_number: None,
                        edit_column: Some(dollar_pos),
                        delete_length: Some(delete_length),
                        replace_text: None,
                    }),
                    severity: Severity::Error,
                    suggestion: Some("Remove the leading $ prompt or show output too".to_string()),
                });
            }
        }

        errors
    }
}
