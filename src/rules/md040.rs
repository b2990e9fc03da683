//! MD040 - Fenced code blocks should have a language specified

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD040;

impl Rule for MD040 {
    fn names(&self) -> &'static [&'static str] {
        &["MD040", "fenced-code-language"]
    }

    fn description(&self) -> &'static str {
        "Fenced code blocks should have a language specified"
    }

    fn tags(&self) -> &[&'static str] {
        &["code", "language", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md040.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut in_code_block = false;

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if crate::helpers::is_code_fence(trimmed) {
                let fence_chars = if trimmed.starts_with("```") {
                    "```"
                } else {
                    "~~~"
                };
                let after_fence = trimmed.trim_start_matches(fence_chars).trim();

                if in_code_block {
                    // This is a closing fence
                    in_code_block = false;
                } else {
                    // This is an opening fence - check if it has a language
                    in_code_block = true;
                    if after_fence.is_empty() {
                        // Get the configured default language (default: "text")
                        let default_lang = params
                            .config
                            .get("default_language")
                            .and_then(|v| v.as_str())
                            .unwrap_or("text");

                        let leading_spaces = line.len() - line.trim_start().len();
                        let fence_len = fence_chars.len();

                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some("Missing language specification".to_string()),
                            error_context: Some(trimmed.to_string()),
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: Some(leading_spaces + 1),
                            length: Some(trimmed.len()),
                            fix_info: Some(FixInfo {
                                line_number: Some(line_number),
                                edit_column: Some(leading_spaces + fence_len + 1),
                                delete_length: None,
                                replace_text: Some(default_lang.to_string()),
                            }),
                            suggestion: Some(
                                "Specify a language for fenced code blocks".to_string(),
                            ),
                            severity: Severity::Error,
                        });
                    }
                }
            }
        }

        errors
    }
}
