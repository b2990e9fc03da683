//! MD050 - Strong style should be consistent

use crate::types::{FixInfo, ParserType, Rule, RuleParams, Severity, Violation};

pub struct MD050;

/// Represents a single strong emphasis match in a line
#[derive(Debug)]
struct StrongMatch {
    /// The full matched text including markers (e.g., "**text**" or "__text__")
    full_match: String,
    /// The style of strong emphasis: "asterisk" or "underscore"
    style: String,
    /// 0-based start position in the line
    start: usize,
}

/// Find all strong emphasis patterns in a line.
/// Matches **text** and __text__ but NOT *text* or _text_.
fn find_strong_matches(line: &str) -> Vec<StrongMatch> {
    let mut matches = Vec::new();
    let bytes = line.as_bytes();
    let len = bytes.len();

    let mut i = 0;
    while i + 1 < len {
        let ch = bytes[i];
        let next = bytes[i + 1];

        if (ch == b'*' && next == b'*') || (ch == b'_' && next == b'_') {
            let marker = ch;

            // Skip tripled markers (e.g., ***)
            if i + 2 < len && bytes[i + 2] == marker {
                i += 1;
                continue;
            }

            let start = i;
            let mut j = i + 2;

            // Content must be non-empty
            if j >= len || bytes[j] == marker || bytes[j] == b'\n' {
                i += 2;
                continue;
            }

            // Find closing double marker
            let mut found_close = false;
            while j + 1 < len {
                if bytes[j] == marker && bytes[j + 1] == marker {
                    // Make sure the closing marker is not tripled
                    let followed_by_marker = j + 2 < len && bytes[j + 2] == marker;

                    if !followed_by_marker {
                        let full = &line[start..j + 2];
                        matches.push(StrongMatch {
                            full_match: full.to_string(),
                            style: if marker == b'*' {
                                "asterisk".to_string()
                            } else {
                                "underscore".to_string()
                            },
                            start,
                        });
                        i = j + 2;
                        found_close = true;
                        break;
                    }
                }
                if bytes[j] == b'\n' {
                    break;
                }
                j += 1;
            }

            if !found_close {
                i += 2;
            }
        } else {
            i += 1;
        }
    }

    matches
}

impl Rule for MD050 {
    fn names(&self) -> &'static [&'static str] {
        &["MD050", "strong-style"]
    }

    fn description(&self) -> &'static str {
        "Strong style should be consistent"
    }

    fn tags(&self) -> &[&'static str] {
        &["emphasis", "fixable"]
    }

    fn parser_type(&self) -> ParserType {
        ParserType::None
    }

    fn information(&self) -> Option<&'static str> {
        Some("https://github.com/DavidAnson/markdownlint/blob/main/doc/md050.md")
    }

    fn lint(&self, params: &RuleParams) -> Vec<Violation> {
        let mut errors = Vec::new();

        // Get configured style: "consistent" (default), "asterisk", or "underscore"
        let configured_style = params
            .config
            .get("style")
            .and_then(|v| v.as_str())
            .unwrap_or("consistent")
            .to_string();

        // First pass: collect all strong emphasis occurrences to determine preferred style
        let mut all_matches: Vec<(usize, StrongMatch)> = Vec::new();

        for (idx, line) in params.lines.iter().enumerate() {
            let line_number = idx + 1;
            for sm in find_strong_matches(line) {
                all_matches.push((line_number, sm));
            }
        }

        if all_matches.is_empty() {
            return errors;
        }

        // Determine the preferred style
        let preferred_style = if configured_style == "consistent" {
            all_matches[0].1.style.clone()
        } else {
            configured_style.clone()
        };

        // Second pass: report errors for wrong-style strong emphasis with fix_info
        for (line_number, sm) in &all_matches {
            if sm.style != preferred_style {
                let corrected = if preferred_style == "asterisk" {
                    // Replace __text__ with **text**
                    let inner = &sm.full_match[2..sm.full_match.len() - 2];
                    format!("**{}**", inner)
                } else {
                    // Replace **text** with __text__
                    let inner = &sm.full_match[2..sm.full_match.len() - 2];
                    format!("__{}__", inner)
                };

                errors.push(Violation {
                    line: *line_number,
                    rule_names: self.names().iter().map(|s| s.to_string()).collect(),
                    description: self.description().to_string(),
                    error_detail: Some(format!(
                        "Expected: {}; Actual: {}",
                        preferred_style, sm.style
                    )),
                    error_context: Some(sm.full_match.clone()),
                    documentation_url: self.information().map(|s| s.to_string()),
                    column: Some(sm.start + 1),
                    length: Some(sm.full_match.len()),
                    fix_info: Some(FixInfo {
                        line_number: None,
                        edit_column: Some(sm.start + 1), // 1-based
                        delete_length: Some(sm.full_match.len() as i64),
                        replace_text: Some(corrected),
                    }),
                    suggestion: Some("Use consistent strong emphasis style".to_string()),
                    severity: Severity::Error,
                });
            }
        }

        errors
    }
}
