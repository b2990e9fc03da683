//! MD037 - Spaces inside emphasis markers

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

static EMPHASIS_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\*|_)( +[^*_]+?[^ *_]+ +)(\*|_)").unwrap());

pub struct MD037;

impl Rule for MD037 {
    fn names(&self) -> &[&'static str] {
        &["MD037", "no-space-in-emphasis"]
    }

    fn description(&self) -> &'static str {
        "Spaces inside emphasis markers"
    }

    fn tags(&self) -> &[&'static str] {
        &["whitespace", "emphasis", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md037.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            for caps in EMPHASIS_SPACE_RE.captures_iter(line) {
                let full_match = caps.get(0).unwrap();
                let open_marker = caps.get(1).unwrap().as_str();
                let inner_content = caps.get(2).unwrap().as_str();
                let close_marker = caps.get(3).unwrap().as_str();
                let trimmed = inner_content.trim();
                let corrected = format!("{}{}{}", open_marker, trimmed, close_marker);

                errors.push(Violation {
                    line: line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: None,
                    error_context: Some(full_match.as_str().to_string()),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(full_match.start() + 1),
                    length: Some(full_match.len()),
                    fix_info: Some(FixInfo {
                        line_number: None,
                        edit_column: Some(full_match.start() + 1),
                        delete_length: Some(full_match.len() as i64),
                        replace_text: Some(corrected),
                    }),
                    suggestion: Some("Remove spaces inside emphasis markers".to_string()),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
