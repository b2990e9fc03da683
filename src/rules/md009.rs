//! MD009 - Trailing spaces
//!
//! This rule checks for lines that end with trailing whitespace.

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD009;

impl Rule for MD009 {
    fn names(&self) -> &'static [&'static str] {
        &["MD009", "no-trailing-spaces"]
    }

    fn description(&self) -> &'static str {
        "Trailing spaces"
    }

    fn tags(&self) -> &[&'static str] {
        &["whitespace", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md009.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            // Remove line ending to check for trailing spaces
            let trimmed_end = line.trim_end_matches('\n').trim_end_matches('\r');

            // Check if there are trailing spaces (but not if the line is empty)
            if trimmed_end.ends_with(' ') || trimmed_end.ends_with('\t') {
                let trailing_start = trimmed_end.trim_end().len();
                let trailing_count = trimmed_end.len() - trailing_start;

                errors.push(Violation {
                    line: line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: Some(format!("Expected: 0; Actual: {}", trailing_count)),
                    error_context: Some(trimmed_end[trailing_start..].to_string()),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(trailing_start + 1),
                    length: Some(trailing_count),
                    fix_info: Some(FixInfo {
                        line_number: None,
                        edit_column: Some(trailing_start + 1),
                        delete_length: Some(trailing_count as i64),
                        replace_text: None,
                    }),
                    suggestion: Some("Remove trailing spaces".to_string()),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
