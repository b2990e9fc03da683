//! MD023 - Headings must start at the beginning of the line

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD023;

impl Rule for MD023 {
    fn names(&self) -> &'static [&'static str] {
        &["MD023", "heading-start-left"]
    }

    fn description(&self) -> &'static str {
        "Headings must start at the beginning of the line"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "spaces", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md023.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            // Check if line starts with spaces/tabs followed by #
            if line.starts_with(' ') || line.starts_with('\t') {
                let trimmed = line.trim_start();
                if trimmed.starts_with('#') {
                    let indent_count = line.len() - trimmed.len();
                    // Strip line endings for cross-platform compatibility
                    let trimmed_no_newline = trimmed.trim_end_matches('\n').trim_end_matches('\r');
                    errors.push(Violation {
                        line: line_number,
                        rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                        description: self.description().to_string(),
                        error_detail: Some(format!("Expected: 0; Actual: {}", indent_count)),
                        error_context: Some({
                            let char_limit = trimmed_no_newline
                                .char_indices()
                                .nth(20)
                                .map(|(i, _)| i)
                                .unwrap_or(trimmed_no_newline.len());
                            trimmed_no_newline[..char_limit].to_string()
                        }),
                        documentation_url: self.information().map(|s| s.to_string()),
                        column: Some(1),
                        length: Some(indent_count),
                        fix_info: Some(FixInfo {
                            line_number: None,
                            edit_column: Some(1),
                            delete_length: Some(indent_count as i64),
                            replace_text: None,
                        }),
                        suggestion: Some(
                            "Headings must start at the beginning of the line".to_string(),
                        ),
                        severity: Severity::Error,
                    });
                }
            }
        }

        errors
    }
}
