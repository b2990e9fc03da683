//! The aggregate output of a lint session.

use crate::types::Violation;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Mapping of identifier (file path or synthetic string name) to its violations.
///
/// Created empty, grown by appending per-identifier violation lists, frozen
/// at return. Total-violations and total-identifiers rollups are derived,
/// not stored, so they always stay consistent with `results`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintResult {
    /// Per-identifier violation lists.
    pub results: HashMap<String, Vec<Violation>>,
}

impl LintResult {
    /// Create a new, empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the violation list for `name`.
    pub fn add(&mut self, name: String, violations: Vec<Violation>) {
        self.results.insert(name, violations);
    }

    /// Violations recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&[Violation]> {
        self.results.get(name).map(|v| v.as_slice())
    }

    /// Total violations across every identifier.
    pub fn total_violations(&self) -> usize {
        self.results.values().map(|v| v.len()).sum()
    }

    /// Total identifiers tracked (whether or not they have violations).
    pub fn total_identifiers(&self) -> usize {
        self.results.len()
    }

    /// Total violations at [`Severity::Error`](crate::types::Severity::Error).
    pub fn error_count(&self) -> usize {
        self.results
            .values()
            .map(|v| v.iter().filter(|e| e.severity == crate::types::Severity::Error).count())
            .sum()
    }

    /// Total violations at [`Severity::Warning`](crate::types::Severity::Warning).
    pub fn warning_count(&self) -> usize {
        self.results
            .values()
            .map(|v| v.iter().filter(|e| e.severity == crate::types::Severity::Warning).count())
            .sum()
    }

    /// Whether any violation is error-severity.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Whether every identifier has zero violations.
    pub fn is_empty(&self) -> bool {
        self.results.values().all(|v| v.is_empty())
    }

    /// Identifiers with at least one violation.
    pub fn identifiers_with_violations(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Render as `file: line: rule description [detail] [Context: "..."]` lines,
    /// sorted by identifier for determinism.
    pub fn to_string_with_alias(&self, use_alias: bool) -> String {
        let mut output = Vec::new();
        let mut names: Vec<_> = self.results.keys().collect();
        names.sort();

        for name in names {
            if let Some(violations) = self.results.get(name) {
                for v in violations {
                    let rule_moniker = if use_alias && v.rule_names.len() > 1 {
                        v.rule_names[1].clone()
                    } else {
                        v.rule_names.join("/")
                    };

                    let mut line = format!("{}: {}: {} {}", name, v.line, rule_moniker, v.description);

                    if let Some(detail) = &v.error_detail {
                        line.push_str(&format!(" [{}]", detail));
                    }

                    if let Some(context) = &v.error_context {
                        line.push_str(&format!(" [Context: \"{}\"]", context));
                    }

                    output.push(line);
                }
            }
        }

        output.join("\n")
    }
}

impl fmt::Display for LintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_alias(false))
    }
}

impl IntoIterator for LintResult {
    type Item = (String, Vec<Violation>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Vec<Violation>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a LintResult {
    type Item = (&'a String, &'a Vec<Violation>);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Vec<Violation>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_lint_result_rollups() {
        let mut result = LintResult::new();

        result.add(
            "file1.md".to_string(),
            vec![Violation {
                line: 1,
                rule_names: vec!["MD001".to_string()],
                description: "Test error".to_string(),
                severity: Severity::Error,
                ..Default::default()
            }],
        );

        result.add(
            "file2.md".to_string(),
            vec![Violation {
                line: 5,
                rule_names: vec!["MD003".to_string()],
                description: "Test warning".to_string(),
                severity: Severity::Warning,
                ..Default::default()
            }],
        );

        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
        assert!(result.has_errors());
        assert!(!result.is_empty());
        assert_eq!(result.identifiers_with_violations().len(), 2);
        assert_eq!(result.total_violations(), 2);
        assert_eq!(result.total_identifiers(), 2);
    }
}
