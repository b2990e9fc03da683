//! MD026 - Trailing punctuation in heading

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD026;

impl Rule for MD026 {
    fn names(&self) -> &[&'static str] {
        &["MD026", "no-trailing-punctuation"]
    }

    fn description(&self) -> &'static str {
        "Trailing punctuation in heading"
    }

    fn tags(&self) -> &[&'static str] {
        &["headings", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md026.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();
        let punctuation = ".,;:!?";

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if trimmed.starts_with('#') {
                let hash_count = trimmed.chars().take_while(|&c| c == '#').count();
                if hash_count > 0 && hash_count <= 6 {
                    let content = trimmed[hash_count..].trim();
                    // Remove trailing # for closed ATX
                    let content = content.trim_end_matches('#').trim_end();

                    if let Some(last_char) = content.chars().last()
                        && punctuation.contains(last_char)
                    {
                        // Compute 1-based column of the punctuation char in the original line
                        let leading_ws = line.len() - line.trim_start().len();
                        // content is a sub-slice of trimmed; find its end position
                        // relative to trimmed start
                        let trimmed_start_in_line = leading_ws;
                        let content_offset_in_trimmed =
                            content.as_ptr() as usize - trimmed.as_ptr() as usize;
                        let punc_byte_offset = content.len() - last_char.len_utf8();
                        let punc_col_0based =
                            trimmed_start_in_line + content_offset_in_trimmed + punc_byte_offset;

                        errors.push(Violation {
                            line: line_number,
                            rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                            description: self.description().to_string(),
                            error_detail: Some(format!("Punctuation: '{}'", last_char)),
                            error_context: Some(content.to_string()),
                            documentation_url: self.information().map(|s| s.to_string()),
                            column: None,
                            length: None,
                            fix_info: Some(FixInfo {
                                line_number: None,
                                edit_column: Some(punc_col_0based + 1), // 1-based
                                delete_length: Some(last_char.len_utf8() as i64),
                                replace_text: None,
                            }),
                            suggestion: Some(
                                "Remove trailing punctuation from heading".to_string(),
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
