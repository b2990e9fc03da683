//! Crate-wide error and diagnostic types.

use serde::Serialize;
use std::fmt;

/// The error kinds a lint/config/fix operation can fail with.
///
/// Fallible operations return `Result<T>` with exactly one of these kinds;
/// they never unwind through the middle of the pipeline. A panic inside a
/// rule closure is caught by the engine and turned into a [`LintError::RuleError`]
/// for that rule rather than propagating.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration JSON/YAML/TOML failed to parse, or a custom rule was malformed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid option shape, unknown severity, plugin enabled without a path,
    /// or a circular `extends` chain.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// A rule closure failed internally (panicked or returned an error).
    #[error("Rule '{rule}' failed: {message}")]
    RuleError {
        /// Primary name of the failing rule.
        rule: String,
        /// Failure detail.
        message: String,
    },

    /// The lint context was cancelled or a per-rule deadline was exceeded.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Applying, writing, or validating a fix failed.
    #[error("Fix error: {0}")]
    FixError(String),
}

impl From<serde_json::Error> for LintError {
    fn from(err: serde_json::Error) -> Self {
        LintError::ParseError(err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for LintError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        LintError::ParseError(err.to_string())
    }
}

impl From<toml::de::Error> for LintError {
    fn from(err: toml::de::Error) -> Self {
        LintError::ParseError(err.to_string())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LintError>;

/// Severity of a reported [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error level — typically fails a CI check.
    #[default]
    Error,
    /// Warning level — reported but non-fatal.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A mechanical edit description attached to a [`Violation`], sufficient for
/// the fix coordinator to apply the fix without re-running the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixInfo {
    /// Line number (1-based) to apply the fix to, if different from the
    /// violation's own `line`.
    pub line_number: Option<usize>,

    /// 1-based column at which the edit starts (`None` = start of line).
    pub edit_column: Option<usize>,

    /// Number of characters to delete starting at `edit_column`.
    /// `-1` is a sentinel for "delete the entire line".
    pub delete_length: Option<i64>,

    /// Text to insert at the edit position (after any deletion).
    pub replace_text: Option<String>,
}

/// A single reported offence, as produced by a [`crate::types::Rule`]'s lint closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule identity: primary name first, then any aliases (e.g. `["MD001", "heading-increment"]`).
    pub rule_names: Vec<String>,

    /// Human-readable description of the violated rule.
    pub description: String,

    /// URL with more information about the rule, if any.
    pub documentation_url: Option<String>,

    /// 1-based line number where the violation occurs.
    pub line: usize,

    /// 1-based column, if meaningful for this violation.
    pub column: Option<usize>,

    /// Length, in characters, of the offending span, if meaningful.
    pub length: Option<usize>,

    /// Additional free-form detail about the specific offence.
    pub error_detail: Option<String>,

    /// A short excerpt of the offending source, for display.
    pub error_context: Option<String>,

    /// Severity of this violation.
    pub severity: Severity,

    /// A mechanical fix, if one was computed.
    pub fix_info: Option<FixInfo>,

    /// A short, human-readable suggestion for how to resolve the violation,
    /// shown alongside `description` even when no mechanical fix is available.
    pub suggestion: Option<String>,
}

impl Default for Violation {
    fn default() -> Self {
        Self {
            rule_names: Vec::new(),
            description: String::new(),
            documentation_url: None,
            line: 0,
            column: None,
            length: None,
            error_detail: None,
            error_context: None,
            severity: Severity::Error,
            fix_info: None,
            suggestion: None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} {}",
            self.line,
            self.severity,
            self.rule_names.join("/"),
            self.description
        )?;

        if let Some(detail) = &self.error_detail {
            write!(f, " [{}]", detail)?;
        }

        if let Some(context) = &self.error_context {
            write!(f, " [Context: \"{}\"]", context)?;
        }

        Ok(())
    }
}
