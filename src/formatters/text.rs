//! Plain text output formatter

use crate::types::LintResult;
use std::collections::HashMap;

/// Format lint results as `file: line: rule description [detail]` lines.
pub fn format_text(results: &LintResult) -> String {
    results.to_string_with_alias(false)
}

/// Format lint results the same way as [`format_text`], but with a source
/// excerpt and a caret under the offending column for violations that carry
/// one. `sources` maps each identifier to its full file content.
pub fn format_text_with_context(results: &LintResult, sources: &HashMap<String, String>) -> String {
    let mut output = Vec::new();
    let mut names: Vec<_> = results.results.keys().collect();
    names.sort();

    for name in names {
        let Some(violations) = results.results.get(name) else {
            continue;
        };

        let lines: Vec<&str> = sources.get(name).map(|s| s.lines().collect()).unwrap_or_default();

        for v in violations {
            let rule = v.rule_names.join("/");
            let mut line = format!("{}: {}: {} {}", name, v.line, rule, v.description);

            if let Some(detail) = &v.error_detail {
                line.push_str(&format!(" [{}]", detail));
            }

            if let Some(context) = &v.error_context {
                line.push_str(&format!(" [Context: \"{}\"]", context));
            }

            output.push(line);

            if let Some(column) = v.column
                && let Some(source_line) = lines.get(v.line.saturating_sub(1))
            {
                output.push(format!("    {}", source_line));
                output.push(format!("    {}^", " ".repeat(column.saturating_sub(1))));
            }
        }
    }

    output.join("\n")
}
