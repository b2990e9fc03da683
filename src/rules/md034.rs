//! MD034 - Bare URL used

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s<>]+").expect("valid regex"));

pub struct MD034;

impl Rule for MD034 {
    fn names(&self) -> &'static [&'static str] {
        &["MD034", "no-bare-urls"]
    }

    fn description(&self) -> &'static str {
        "Bare URL used"
    }

    fn tags(&self) -> &[&'static str] {
        &["links", "url", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md034.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;

            // Skip if line contains markdown link syntax
            if line.contains("](") || line.contains("<http") {
                continue;
            }

            for mat in URL_RE.find_iter(line) {
                let url = mat.as_str();
                errors.push(Violation {
                    line: line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: None,
                    error_context: Some(url.to_string()),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(mat.start() + 1),
                    length: Some(mat.len()),
                    fix_info: Some(FixInfo {
                        line_number: None,
                        edit_column: Some(mat.start() + 1),
                        delete_length: Some(mat.len() as i64),
                        replace_text: Some(format!("<{}>", url)),
                    }),
                    suggestion: Some(
                        "Use angle brackets for bare URLs: <http://example.com>".to_string(),
                    ),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
