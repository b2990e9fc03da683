//! The `Rule` trait and the parameters passed to it.

use crate::parser::Token;
use crate::types::Violation;
use std::collections::HashMap;

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;

/// Whether a rule needs the token tree or can work purely from the line array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    /// The rule walks the token tree (structural rules, e.g. heading-increment).
    Tokens,
    /// The rule only needs the raw line array (lexical rules, e.g. hard-tabs).
    None,
}

/// The immutable input to a rule's lint closure.
pub struct RuleParams<'a> {
    /// Identifier for the content being linted (a file path or synthetic name).
    pub name: &'a str,

    /// Library version, exposed for rules that embed it in messages.
    pub version: &'a str,

    /// Lines of the markdown content (front matter and line endings stripped).
    pub lines: &'a [&'a str],

    /// Front matter lines, if the document had a recognized front-matter block.
    pub front_matter_lines: &'a [&'a str],

    /// Parsed front matter as a key/value map, if the front matter was YAML/TOML/JSON.
    pub front_matter: Option<&'a HashMap<String, serde_json::Value>>,

    /// Top-level token tree produced by the tokenizer (empty unless `parser_type()` is `Tokens`).
    pub tokens: &'a [Token],

    /// Effective configuration for this rule (defaults merged with user overrides).
    pub config: &'a HashMap<String, serde_json::Value>,

    /// Heading anchors collected across the rest of the workspace, keyed by
    /// file identifier, for cross-file link-fragment rules (e.g. MD051).
    /// `None` when the caller has not built a workspace index (single-file lint).
    pub workspace_headings: Option<&'a HashMap<String, Vec<String>>>,
}

#[cfg(test)]
impl<'a> RuleParams<'a> {
    /// Create test params with lines, tokens, and config.
    pub fn test_with_tokens(
        lines: &'a [&'a str],
        tokens: &'a [Token],
        config: &'a HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            name: "test.md",
            version: "0.1.0",
            lines,
            front_matter_lines: &[],
            front_matter: None,
            tokens,
            config,
            workspace_headings: None,
        }
    }

    /// Create test params with lines and config (no tokens).
    pub fn test(lines: &'a [&'a str], config: &'a HashMap<String, serde_json::Value>) -> Self {
        Self::test_with_tokens(lines, &[], config)
    }
}

/// A rule: an immutable entity with a name, description, tags, and an
/// execution closure `(params) -> Vec<Violation>`.
///
/// Implementors must be `Send + Sync`: the engine may run rules concurrently
/// across a bounded worker pool.
pub trait Rule: Send + Sync {
    /// Rule names: first is primary, the rest are aliases, matched case-insensitively.
    ///
    /// Example: `["MD001", "heading-increment"]`
    fn names(&self) -> &'static [&'static str];

    /// Human-readable description.
    ///
    /// Example: "Heading levels should only increment by one level at a time"
    fn description(&self) -> &'static str;

    /// Free-form categories used to enable/disable rules in bulk.
    ///
    /// Example: `["headings"]`
    fn tags(&self) -> &[&'static str];

    /// Whether this rule needs the token tree or only the line array.
    fn parser_type(&self) -> ParserType {
        ParserType::Tokens
    }

    /// URL with more information about this rule, if any.
    fn information(&self) -> Option<&'static str> {
        None
    }

    /// Whether this rule runs when no config entry names it explicitly.
    ///
    /// Returns `false` for rules registered but disabled by default (to match
    /// the reference linter's defaults).
    fn is_enabled_by_default(&self) -> bool {
        true
    }

    /// Whether this rule prefers the asynchronous entry point.
    fn is_async(&self) -> bool {
        false
    }

    /// Run the rule against `params`, synchronously.
    fn lint(&self, params: &RuleParams) -> Vec<Violation>;

    /// Run the rule against `params`, asynchronously.
    ///
    /// The default delegates to [`Rule::lint`]; override only if the rule
    /// itself needs to await something (e.g. a cross-file cache warm-up).
    #[cfg(feature = "async")]
    fn lint_async<'a>(
        &'a self,
        params: &'a RuleParams<'a>,
    ) -> Pin<Box<dyn Future<Output = Vec<Violation>> + Send + 'a>> {
        Box::pin(async move { self.lint(params) })
    }
}

/// A type-erased, owned rule.
pub type BoxedRule = Box<dyn Rule>;

/// Shared lookup helpers for a collection of rules.
pub trait RuleRegistry {
    /// All rules in the registry.
    fn rules(&self) -> &[BoxedRule];

    /// Find a rule by name or alias (case-insensitive).
    fn find_rule(&self, name: &str) -> Option<&dyn Rule> {
        let name_upper = name.to_uppercase();
        self.rules().iter().find_map(|rule| {
            if rule.names().iter().any(|n| n.to_uppercase() == name_upper) {
                Some(&**rule)
            } else {
                None
            }
        })
    }

    /// Find all rules carrying `tag` (case-insensitive).
    fn find_rules_by_tag(&self, tag: &str) -> Vec<&dyn Rule> {
        let tag_upper = tag.to_uppercase();
        self.rules()
            .iter()
            .filter(|rule| rule.tags().iter().any(|t| t.to_uppercase() == tag_upper))
            .map(|r| &**r)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn names(&self) -> &'static [&'static str] {
            &["TEST001", "test-rule"]
        }

        fn description(&self) -> &'static str {
            "Test rule"
        }

        fn tags(&self) -> &[&'static str] {
            &["test"]
        }

        fn lint(&self, _params: &RuleParams) -> Vec<Violation> {
            vec![]
        }
    }

    #[test]
    fn test_rule_names() {
        let rule = TestRule;
        assert_eq!(rule.names(), &["TEST001", "test-rule"]);
        assert_eq!(rule.description(), "Test rule");
        assert_eq!(rule.tags(), &["test"]);
    }
}
