//! MD047 - Files should end with a single newline character

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD047;

impl Rule for MD047 {
    fn names(&self) -> &'static [&'static str] {
        &["MD047", "single-trailing-newline"]
    }

    fn description(&self) -> &'static str {
        "Files should end with a single newline character"
    }

    fn tags(&self) -> &[&'static str] {
        &["blank_lines", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md047.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        if params.lines.is_empty() {
            return errors;
        }

        let last_line = &params.lines[params.lines.len() - 1];

        // Check if file ends with newline
        if !last_line.ends_with('\n') && !last_line.ends_with("\r\n") {
            errors.push(Violation {
                line: params.lines.len(),
                rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                description: self.description().to_string(),
                error_detail: None,
                error_context: None,
                documentation_url: self.information().map(|s| s.to_string()),
                column: None,
                length: None,
                fix_info: Some(FixInfo {
                    line_number: Some(params.lines.len()),
                    edit_column: Some(last_line.len() + 1),
                    delete_length: None,
                    replace_text: Some("\n".to_string()),
                }),
                suggestion: Some("Files should end with a single newline character".to_string()),
                severity: Severity::Error,
            });
        }

        errors
    }
}
