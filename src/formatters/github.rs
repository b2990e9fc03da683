//! GitHub Actions workflow command formatter
//!
//! Outputs lint errors as GitHub Actions annotation commands:
//! `::error file={file},line={line},col={col},endLine={line},endColumn={endCol},title={rule}::{message}`
//!
//! These are picked up by GitHub Actions runners and displayed as PR annotations
//! in the Files Changed view.

use crate::types::{LintResult, Severity};

/// Format lint results as GitHub Actions workflow annotation commands.
///
/// Each violation produces one line on stdout in the format:
/// ```text
/// ::error file=foo.md,line=5,col=1,endLine=5,endColumn=20,title=MD009::Trailing spaces [Expected: 0; Actual: 3]
/// ```
pub fn format_github(results: &LintResult) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut files: Vec<_> = results.results.keys().collect();
    files.sort();

    for file in &files {
        if let Some(violations) = results.results.get(*file) {
            for violation in violations {
                let level = match violation.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                };

                let line = violation.line;
                let (col, end_col) = match (violation.column, violation.length) {
                    (Some(start_col), Some(length)) => (start_col, start_col + length),
                    (Some(start_col), None) => (start_col, start_col),
                    (None, _) => (1, 1),
                };

                let title = violation.rule_names.first().map(String::as_str).unwrap_or("mdlint");

                let mut message = violation.description.clone();
                if let Some(detail) = &violation.error_detail {
                    message.push_str(&format!(" [{}]", detail));
                }

                lines.push(format!(
                    "::{level} file={file},line={line},col={col},endLine={line},endColumn={end_col},title={title}::{message}",
                ));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Violation;

    fn make_error(severity: Severity) -> Violation {
        Violation {
            line: 5,
            rule_names: vec!["MD009".to_string(), "no-trailing-spaces".to_string()],
            description: "Trailing spaces".to_string(),
            error_detail: Some("Expected: 0; Actual: 3".to_string()),
            column: Some(3),
            length: Some(10),
            severity,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_github_error() {
        let mut results = LintResult::new();
        results.add("foo.md".to_string(), vec![make_error(Severity::Error)]);
        let output = format_github(&results);
        assert!(
            output.starts_with("::error "),
            "Should start with ::error. Got: {output}"
        );
        assert!(output.contains("file=foo.md"), "Should include filename");
        assert!(output.contains("line=5"), "Should include line number");
        assert!(output.contains("title=MD009"), "Should include rule name");
        assert!(
            output.contains("Trailing spaces"),
            "Should include description"
        );
        assert!(
            output.contains("Expected: 0; Actual: 3"),
            "Should include detail"
        );
    }

    #[test]
    fn test_format_github_warning() {
        let mut results = LintResult::new();
        results.add("bar.md".to_string(), vec![make_error(Severity::Warning)]);
        let output = format_github(&results);
        assert!(
            output.starts_with("::warning "),
            "Should start with ::warning. Got: {output}"
        );
    }

    #[test]
    fn test_format_github_column_range() {
        let mut results = LintResult::new();
        results.add("foo.md".to_string(), vec![make_error(Severity::Error)]);
        let output = format_github(&results);
        // col=3, endColumn=13 (3+10)
        assert!(output.contains("col=3"), "Should include col");
        assert!(output.contains("endColumn=13"), "Should include endColumn");
    }
}
