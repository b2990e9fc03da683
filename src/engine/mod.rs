//! The rule engine: owns the rule catalog, resolves per-rule enablement and
//! configuration, and dispatches rules against a parsed document.

use crate::config::{Config, RuleConfig};
use crate::parser::Token;
use crate::types::{BoxedRule, LintError, ParserType, Result, Rule, RuleParams, Severity, Violation};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default bound on concurrently-running rules under the async engine.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
/// Default per-rule deadline, in seconds, under the async engine.
pub const DEFAULT_RULE_TIMEOUT_SECS: u64 = 30;

/// Owns the rule catalog plus the enablement/config indices derived from a
/// [`Config`], and dispatches rules against a document.
pub struct RuleEngine {
    rules: Vec<BoxedRule>,
    /// case-folded name/alias -> index into `rules`
    name_index: HashMap<String, usize>,
    /// case-folded tag -> indices into `rules`
    tag_index: HashMap<String, Vec<usize>>,
    /// primary name -> enabled
    enabled: HashMap<String, bool>,
    /// primary name -> effective options
    configs: HashMap<String, HashMap<String, serde_json::Value>>,
    /// primary name -> severity override
    severities: HashMap<String, Severity>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// An empty engine with no rules registered.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            name_index: HashMap::new(),
            tag_index: HashMap::new(),
            enabled: HashMap::new(),
            configs: HashMap::new(),
            severities: HashMap::new(),
        }
    }

    /// Register `rule`, failing if any of its names/aliases collide with an
    /// already-registered rule.
    pub fn register(&mut self, rule: BoxedRule) -> Result<()> {
        for name in rule.names() {
            let key = name.to_lowercase();
            if self.name_index.contains_key(&key) {
                return Err(LintError::ConfigError(format!(
                    "rule name/alias '{name}' collides with an already-registered rule"
                )));
            }
        }
        let index = self.rules.len();
        let primary = rule.names()[0].to_string();
        self.enabled.insert(primary.clone(), rule.is_enabled_by_default());
        for name in rule.names() {
            self.name_index.insert(name.to_lowercase(), index);
        }
        for tag in rule.tags() {
            self.tag_index.entry(tag.to_lowercase()).or_default().push(index);
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Register every rule in `rules`, in order. Fails on the first collision.
    pub fn register_all(&mut self, rules: Vec<BoxedRule>) -> Result<()> {
        for rule in rules {
            self.register(rule)?;
        }
        Ok(())
    }

    /// Find a rule by name, alias, or tag membership (first match).
    pub fn find_rule(&self, key: &str) -> Option<&dyn Rule> {
        let lower = key.to_lowercase();
        if let Some(&idx) = self.name_index.get(&lower) {
            return Some(&*self.rules[idx]);
        }
        self.tag_index.get(&lower).and_then(|v| v.first()).map(|&idx| &*self.rules[idx])
    }

    /// All registered rules.
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }

    /// Apply a resolved [`Config`] to this engine's enablement/config indices.
    ///
    /// The whole call is atomic: it is computed into fresh maps first, and
    /// only swapped in once every key has resolved successfully.
    pub fn configure(&mut self, config: &Config) -> Result<()> {
        let default_enabled = config.default.unwrap_or(true);
        let mut enabled: HashMap<String, bool> =
            self.rules.iter().map(|r| (r.names()[0].to_string(), r.is_enabled_by_default() && default_enabled)).collect();
        if config.default.is_some() {
            for r in &self.rules {
                enabled.insert(r.names()[0].to_string(), default_enabled);
            }
        }
        let mut configs: HashMap<String, HashMap<String, serde_json::Value>> = HashMap::new();
        let mut severities: HashMap<String, Severity> = HashMap::new();

        for (key, value) in &config.rules {
            let indices = self.resolve_key(key);
            if indices.is_empty() {
                continue; // unknown keys are ignored, not an error
            }
            match value {
                RuleConfig::Enabled(on) => {
                    for &idx in &indices {
                        enabled.insert(self.rules[idx].names()[0].to_string(), *on);
                    }
                }
                RuleConfig::Severity(s) => {
                    let sev = match s.to_lowercase().as_str() {
                        "warning" | "warn" => Severity::Warning,
                        "error" => Severity::Error,
                        other => {
                            return Err(LintError::ConfigError(format!(
                                "unknown severity '{other}' for rule key '{key}'"
                            )));
                        }
                    };
                    for &idx in &indices {
                        let primary = self.rules[idx].names()[0].to_string();
                        enabled.insert(primary.clone(), true);
                        severities.insert(primary, sev);
                    }
                }
                RuleConfig::Options(opts) => {
                    for &idx in &indices {
                        let primary = self.rules[idx].names()[0].to_string();
                        let rule_enabled = opts.get("enabled").and_then(|v| v.as_bool()).unwrap_or(true);
                        enabled.insert(primary.clone(), rule_enabled);
                        configs.insert(primary, opts.clone());
                    }
                }
            }
        }

        self.enabled = enabled;
        self.configs = configs;
        self.severities = severities;
        Ok(())
    }

    fn resolve_key(&self, key: &str) -> Vec<usize> {
        let lower = key.to_lowercase();
        if let Some(&idx) = self.name_index.get(&lower) {
            return vec![idx];
        }
        self.tag_index.get(&lower).cloned().unwrap_or_default()
    }

    /// Whether any registered rule needs the token tree, so callers can skip
    /// tokenizing when every enabled rule is purely lexical.
    pub fn any_enabled_rule_needs_tokens(&self) -> bool {
        self.rules
            .iter()
            .any(|r| self.is_enabled(r.names()[0]) && matches!(r.parser_type(), ParserType::Tokens))
    }

    fn is_enabled(&self, primary_name: &str) -> bool {
        self.enabled.get(primary_name).copied().unwrap_or(true)
    }

    fn effective_config(&self, primary_name: &str) -> HashMap<String, serde_json::Value> {
        self.configs.get(primary_name).cloned().unwrap_or_default()
    }

    /// Run every enabled rule against the document, in registration order,
    /// concatenating their violations. A rule whose closure panics is
    /// sandboxed into a single [`LintError::RuleError`]-flavored violation.
    #[allow(clippy::too_many_arguments)]
    pub fn lint(
        &self,
        identifier: &str,
        version: &str,
        lines: &[&str],
        front_matter_lines: &[&str],
        front_matter: Option<&HashMap<String, serde_json::Value>>,
        tokens: &[Token],
        workspace_headings: Option<&HashMap<String, Vec<String>>>,
        cancelled: &AtomicBool,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for rule in &self.rules {
            let primary = rule.names()[0];
            if !self.is_enabled(primary) {
                continue;
            }
            if cancelled.load(Ordering::Relaxed) {
                out.push(cancelled_violation(primary));
                break;
            }
            let config = self.effective_config(primary);
            let params = RuleParams {
                name: identifier,
                version,
                lines,
                front_matter_lines,
                front_matter,
                tokens,
                config: &config,
                workspace_headings,
            };
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.lint(&params)));
            match outcome {
                Ok(mut violations) => {
                    for v in &mut violations {
                        if v.rule_names.is_empty() {
                            v.rule_names = rule.names().iter().map(|s| s.to_string()).collect();
                        }
                        if v.documentation_url.is_none() {
                            v.documentation_url = rule.information().map(|s| s.to_string());
                        }
                        if let Some(sev) = self.severities.get(primary) {
                            v.severity = *sev;
                        }
                    }
                    out.extend(violations);
                }
                Err(panic) => {
                    let message = panic_message(&panic);
                    out.push(rule_error_violation(rule.names(), &message));
                }
            }
        }
        out
    }

    /// Run every enabled rule concurrently on a bounded worker pool, honoring
    /// `max_concurrency` and a per-rule `timeout`. Requires the `async` feature.
    ///
    /// The engine must be wrapped in an `Arc` so each rule's `spawn_blocking`
    /// task can hold its own owned handle; this mirrors how the orchestrator
    /// shares `Arc<Config>`/`Arc<PreparedRules>` across file-level tasks.
    #[cfg(feature = "async")]
    #[allow(clippy::too_many_arguments)]
    pub async fn lint_async(
        self: &std::sync::Arc<Self>,
        identifier: &str,
        version: &str,
        lines: &[&str],
        front_matter_lines: &[&str],
        front_matter: Option<&HashMap<String, serde_json::Value>>,
        tokens: &[Token],
        workspace_headings: Option<&HashMap<String, Vec<String>>>,
        max_concurrency: usize,
        timeout_secs: u64,
    ) -> Vec<Violation> {
        use tokio::sync::Semaphore;

        let max_concurrency = if max_concurrency == 0 { DEFAULT_MAX_CONCURRENCY } else { max_concurrency };
        let timeout_secs = if timeout_secs == 0 { DEFAULT_RULE_TIMEOUT_SECS } else { timeout_secs };
        let semaphore = std::sync::Arc::new(Semaphore::new(max_concurrency));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Vec<Violation>>();

        let owned = std::sync::Arc::new(OwnedDocument {
            name: identifier.to_string(),
            version: version.to_string(),
            lines: lines.iter().map(|s| s.to_string()).collect(),
            front_matter_lines: front_matter_lines.iter().map(|s| s.to_string()).collect(),
            front_matter: front_matter.cloned(),
            tokens: tokens.to_vec(),
            workspace_headings: workspace_headings.cloned(),
        });

        let mut scheduled = 0usize;
        for (index, rule) in self.rules.iter().enumerate() {
            let primary = rule.names()[0];
            if !self.is_enabled(primary) {
                continue;
            }
            let config = self.effective_config(primary);
            let engine = std::sync::Arc::clone(self);
            let doc = std::sync::Arc::clone(&owned);
            let permit = semaphore.clone().acquire_owned().await.expect("semaphore not closed");
            let tx = tx.clone();
            scheduled += 1;

            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let rule = &engine.rules[index];
                let rule_names: Vec<String> = rule.names().iter().map(|s| s.to_string()).collect();
                let documentation_url = rule.information().map(|s| s.to_string());
                let severity_override = engine.severities.get(rule_names[0].as_str()).copied();

                let line_refs: Vec<&str> = doc.lines.iter().map(|s| s.as_str()).collect();
                let fm_refs: Vec<&str> = doc.front_matter_lines.iter().map(|s| s.as_str()).collect();
                let params = RuleParams {
                    name: &doc.name,
                    version: &doc.version,
                    lines: &line_refs,
                    front_matter_lines: &fm_refs,
                    front_matter: doc.front_matter.as_ref(),
                    tokens: &doc.tokens,
                    config: &config,
                    workspace_headings: doc.workspace_headings.as_ref(),
                };

                let deadline = std::time::Duration::from_secs(timeout_secs);
                let start = std::time::Instant::now();
                let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.lint(&params)));
                let elapsed = start.elapsed();
                let mut violations = if elapsed > deadline {
                    vec![cancelled_violation(&rule_names[0])]
                } else {
                    match outcome {
                        Ok(v) => v,
                        Err(panic) => vec![rule_error_violation(
                            &rule_names.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                            &panic_message(&panic),
                        )],
                    }
                };
                for v in &mut violations {
                    if v.rule_names.is_empty() {
                        v.rule_names = rule_names.clone();
                    }
                    if v.documentation_url.is_none() {
                        v.documentation_url = documentation_url.clone();
                    }
                    if let Some(sev) = severity_override {
                        v.severity = sev;
                    }
                }
                let _ = tx.send(violations);
            });
        }
        drop(tx);

        let mut out = Vec::new();
        for _ in 0..scheduled {
            if let Some(violations) = rx.recv().await {
                out.extend(violations);
            }
        }
        out
    }
}

fn cancelled_violation(rule_name: &str) -> Violation {
    Violation {
        rule_names: vec![rule_name.to_string()],
        description: "rule execution was cancelled".to_string(),
        severity: Severity::Error,
        error_detail: Some("deadline exceeded or context cancelled".to_string()),
        line: 1,
        ..Default::default()
    }
}

fn rule_error_violation(rule_names: &[&str], message: &str) -> Violation {
    Violation {
        rule_names: rule_names.iter().map(|s| s.to_string()).collect(),
        description: "rule execution failed".to_string(),
        severity: Severity::Error,
        error_detail: Some(message.to_string()),
        line: 1,
        ..Default::default()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Owned snapshot of a document, shared across per-rule `spawn_blocking`
/// tasks so each can borrow its own `&str` slices without touching `self`.
#[cfg(feature = "async")]
struct OwnedDocument {
    name: String,
    version: String,
    lines: Vec<String>,
    front_matter_lines: Vec<String>,
    front_matter: Option<HashMap<String, serde_json::Value>>,
    tokens: Vec<Token>,
    workspace_headings: Option<HashMap<String, Vec<String>>>,
}
