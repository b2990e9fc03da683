//! Configuration loading, `extends` resolution, and named presets.

pub mod presets;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::{LintError, Result};

/// A lint configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default enablement for rules with no explicit entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,

    /// Ordered list of other config identifiers this config inherits from.
    /// Earlier entries are applied first, so later entries (including `self`)
    /// win on conflict.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    /// Named preset to apply (e.g. `"github"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Per-rule configuration, flattened into the top-level object.
    #[serde(flatten)]
    pub rules: HashMap<String, RuleConfig>,
}

/// Per-rule configuration value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    /// Simple enable/disable.
    Enabled(bool),

    /// Severity override (`"error"` / `"warning"`), implies enabled.
    Severity(String),

    /// Rule-specific options, implies enabled unless `"enabled": false` is present.
    Options(HashMap<String, serde_json::Value>),
}

impl Config {
    /// A new, empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from a file, dispatching on extension (falling back to trying
    /// JSON, then YAML, then TOML, for extension-less names like `.markdownlintrc`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("toml") => Self::from_toml_file(path),
            _ => Self::from_json_file(path)
                .or_else(|_| Self::from_yaml_file(path))
                .or_else(|_| Self::from_toml_file(path)),
        }
    }

    const DISCOVERY_NAMES: [&'static str; 5] = [
        ".markdownlint.json",
        ".markdownlint.yaml",
        ".markdownlint.yml",
        ".markdownlint.toml",
        ".markdownlintrc",
    ];

    /// Walk up from `start_dir` looking for a recognized config file name.
    pub fn discover(start_dir: impl AsRef<Path>) -> Option<Self> {
        let mut dir = start_dir.as_ref().to_path_buf();
        loop {
            for name in &Self::DISCOVERY_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    match Self::from_file(&candidate) {
                        Ok(config) => {
                            log::debug!("found config file: {}", candidate.display());
                            return Some(config);
                        }
                        Err(e) => {
                            log::debug!("skipping unparseable config {}: {e}", candidate.display());
                        }
                    }
                }
            }
            if !dir.pop() {
                break;
            }
        }
        log::debug!("no config file found walking up from {}", start_dir.as_ref().display());
        None
    }

    /// Apply the named preset (if any) as a base, with `self`'s explicit rules
    /// layered on top.
    pub fn apply_preset(&mut self) {
        if let Some(ref name) = self.preset.clone()
            && let Some(mut base) = presets::resolve_preset(name)
        {
            base.merge(self.clone());
            *self = base;
            self.preset = Some(name.clone());
        }
    }

    /// Merge `other` on top of `self` (in place): `other`'s non-empty scalars
    /// win, and `other`'s rule entries replace same-named entries of `self`.
    pub fn merge(&mut self, other: Config) {
        if other.default.is_some() {
            self.default = other.default;
        }
        if other.preset.is_some() {
            self.preset = other.preset;
        }
        self.rules.extend(other.rules);
    }

    /// Rule configuration for `rule_name`, if set.
    pub fn get_rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Whether `rule_name` is enabled given this (already-resolved) configuration.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match self.get_rule_config(rule_name) {
            Some(RuleConfig::Enabled(enabled)) => *enabled,
            Some(RuleConfig::Severity(_)) => true,
            Some(RuleConfig::Options(opts)) => opts.get("enabled").and_then(|v| v.as_bool()).unwrap_or(true),
            None => self.default.unwrap_or(true),
        }
    }

    /// Configured severity override for `rule_name`, if any.
    ///
    /// Accepts both `"MD001": "warning"` and `"MD001": {"severity": "warning"}`.
    pub fn get_rule_severity(&self, rule_name: &str) -> Option<crate::types::Severity> {
        match self.get_rule_config(rule_name) {
            Some(RuleConfig::Severity(s)) => parse_severity(s),
            Some(RuleConfig::Options(opts)) => opts.get("severity").and_then(|v| v.as_str()).and_then(parse_severity),
            _ => None,
        }
    }
}

fn parse_severity(s: &str) -> Option<crate::types::Severity> {
    match s.to_lowercase().as_str() {
        "warning" | "warn" => Some(crate::types::Severity::Warning),
        "error" => Some(crate::types::Severity::Error),
        _ => None,
    }
}

/// Resolves a `Config`'s `extends` chain into a single, flat, frozen configuration.
///
/// Each call to [`ConfigResolver::resolve`] starts a fresh traversal stack so
/// cycles are detected per-call rather than across the resolver's lifetime;
/// a small cache keyed by identifier avoids re-reading/re-merging config
/// documents that appear in more than one `extends` chain within a session.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    cache: HashMap<String, Config>,
}

impl ConfigResolver {
    /// A new resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `config`, whose own identifier (for cycle-error messages and
    /// caching) is `identifier`. Extends-chain entries are resolved relative
    /// to `base_dir` when they look like relative paths.
    pub fn resolve(&mut self, identifier: &str, config: &Config, base_dir: &Path) -> Result<Config> {
        let mut stack = Vec::new();
        let resolved = self.resolve_inner(identifier, config, base_dir, &mut stack)?;
        self.cache.insert(identifier.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn resolve_inner(
        &mut self,
        identifier: &str,
        config: &Config,
        base_dir: &Path,
        stack: &mut Vec<String>,
    ) -> Result<Config> {
        if stack.contains(&identifier.to_string()) {
            let mut path = stack.clone();
            path.push(identifier.to_string());
            log::warn!("circular extends chain detected: {}", path.join(" -> "));
            return Err(LintError::ConfigError(format!(
                "circular dependency in extends chain: {}",
                path.join(" -> ")
            )));
        }
        stack.push(identifier.to_string());

        let mut resolved = Config::new();
        for parent_id in &config.extends {
            if let Some(cached) = self.cache.get(parent_id) {
                resolved.merge(cached.clone());
                continue;
            }
            log::debug!("resolving extends '{parent_id}' for '{identifier}'");
            let parent_path = resolve_relative(base_dir, parent_id);
            let parent_config = Config::from_file(&parent_path)
                .map_err(|e| LintError::ConfigError(format!("extends '{parent_id}': {e}")))?;
            let parent_dir = parent_path.parent().unwrap_or(base_dir).to_path_buf();
            let parent_resolved = self.resolve_inner(parent_id, &parent_config, &parent_dir, stack)?;
            resolved.merge(parent_resolved);
        }

        resolved.merge(config.clone());
        resolved.extends.clear();
        resolved.apply_preset();
        stack.pop();
        Ok(resolved)
    }
}

fn resolve_relative(base_dir: &Path, identifier: &str) -> PathBuf {
    let candidate = Path::new(identifier);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base_dir.join(candidate)
    }
}

/// Backward-compatible convenience wrapper around [`ConfigResolver`] for a
/// standalone `Config` with no known base directory (uses the current directory).
impl Config {
    /// Resolve this config's `extends` chain, with cycle detection, relative
    /// to the current working directory.
    pub fn resolve_extends(&self) -> Result<Self> {
        let mut resolver = ConfigResolver::new();
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        resolver.resolve("<root>", self, &cwd)
    }
}

/// Trait for pluggable configuration-format parsers (beyond JSON/YAML/TOML).
pub trait ConfigParser {
    /// Parse a configuration document from its textual form.
    fn parse(&self, content: &str) -> Result<Config>;
}
