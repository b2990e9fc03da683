//! MD039 - Spaces inside link text

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

static LINK_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[( +[^\]]+?[^ \]]+ +)\]").unwrap());

pub struct MD039;

impl Rule for MD039 {
    fn names(&self) -> &[&'static str] {
        &["MD039", "no-space-in-links"]
    }

    fn description(&self) -> &'static str {
        "Spaces inside link text"
    }

    fn tags(&self) -> &[&'static str] {
        &["whitespace", "links", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md039.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            for caps in LINK_SPACE_RE.captures_iter(line) {
                let full_match = caps.get(0).unwrap();
                let inner_content = caps.get(1).unwrap().as_str();
                let trimmed = inner_content.trim();
                let corrected = format!("[{}]", trimmed);

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
                    suggestion: Some("Remove spaces inside link text".to_string()),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
