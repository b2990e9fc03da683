//! MD011 - Reversed link syntax
//!
//! This rule checks for reversed link syntax like (text)[link] instead of [text](link)

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

static REVERSED_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)\[([^\]]+)\]").unwrap());

pub struct MD011;

impl Rule for MD011 {
    fn names(&self) -> &[&'static str] {
        &["MD011", "no-reversed-links"]
    }

    fn description(&self) -> &'static str {
        "Reversed link syntax"
    }

    fn tags(&self) -> &[&'static str] {
        &["links"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md011.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            for caps in REVERSED_LINK_RE.captures_iter(line) {
                let mat = caps.get(0).unwrap();
                let text = caps.get(1).unwrap().as_str();
                let url = caps.get(2).unwrap().as_str();
                let corrected = format!("[{}]({})", text, url);

                errors.push(Violation {
                    line: line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: None,
                    error_context: Some(mat.as_str().to_string()),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(mat.start() + 1),
                    length: Some(mat.len()),
                    fix_info: Some(FixInfo {
                        line_number: None,
                        edit_column: Some(mat.start() + 1),
                        delete_length: Some(mat.len() as i64),
                        replace_text: Some(corrected),
                    }),
                    severity: Severity::Error,
                    suggestion: Some("Swap reversed link syntax to [text](link)".to_string()),
                });
            }
        }

        errors
    }
}
