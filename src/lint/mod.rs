//! The linter orchestrator: configuration loading, front-matter stripping,
//! tokenizer/engine dispatch, inline-directive filtering, and the
//! per-identifier result cache.

pub mod inline_config;

use crate::config::Config;
use crate::engine::RuleEngine;
use crate::parser;
use crate::rules;
use crate::types::{LintOptions, LintResult, Result, Severity, Violation};
use inline_config::InlineConfig;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::RwLock;

/// Default number of worker threads used to lint a batch of identifiers.
pub const DEFAULT_WORKER_POOL_SIZE: usize = 4;

/// Synthetic rule name stamped on violations synthesized for a file that
/// could not be read.
pub const FILE_ERROR_RULE: &str = "FILE_ERROR";
/// Synthetic rule name stamped on violations synthesized for a string input
/// that could not be linted (reserved for parity with `FILE_ERROR`).
pub const STRING_ERROR_RULE: &str = "STRING_ERROR";

/// Owns a configured [`RuleEngine`] and a per-identifier result cache.
///
/// Results for an identifier are reused across calls to `lint_files`/
/// `lint_strings` until `reconfigure` invalidates the whole cache (the
/// cache has no finer-grained invalidation: a config change can alter any
/// rule's output, so a full clear is the only sound option).
pub struct Linter {
    engine: RuleEngine,
    front_matter_pattern: Option<String>,
    cache: RwLock<HashMap<String, Vec<Violation>>>,
}

impl Linter {
    /// Build a linter with every built-in rule plus `custom_rules`,
    /// configured from `config`.
    pub fn new(config: &Config, front_matter_pattern: Option<String>, custom_rules: Vec<crate::types::BoxedRule>) -> Result<Self> {
        let mut engine = RuleEngine::new();
        engine.register_all(rules::get_rules())?;
        engine.register_all(custom_rules)?;
        engine.configure(config)?;
        Ok(Self {
            engine,
            front_matter_pattern,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Replace the active configuration, invalidating every cached result.
    pub fn reconfigure(&mut self, config: &Config) -> Result<()> {
        self.engine.configure(config)?;
        self.cache.write().expect("lint result cache lock poisoned").clear();
        Ok(())
    }

    /// Lint `files` (paths), reading each with lossy UTF-8 decoding. A file
    /// that cannot be read produces a single synthetic [`FILE_ERROR_RULE`]
    /// violation for that identifier rather than failing the whole batch.
    pub fn lint_files(&self, files: &[String], worker_pool_size: usize, workspace_headings: Option<&HashMap<String, Vec<String>>>) -> LintResult {
        self.lint_files_inner(files, worker_pool_size, workspace_headings, true)
    }

    fn lint_files_inner(&self, files: &[String], worker_pool_size: usize, workspace_headings: Option<&HashMap<String, Vec<String>>>, honor_inline_config: bool) -> LintResult {
        let pool_size = if worker_pool_size == 0 { DEFAULT_WORKER_POOL_SIZE } else { worker_pool_size };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(pool_size)
            .build()
            .expect("failed to build lint worker pool");

        let pairs: Vec<(String, Vec<Violation>)> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    if let Some(cached) = self.cached(path) {
                        return (path.clone(), cached);
                    }
                    let violations = match std::fs::read(path) {
                        Ok(bytes) => {
                            let content = String::from_utf8_lossy(&bytes).into_owned();
                            self.lint_content_inner(path, &content, workspace_headings, honor_inline_config)
                        }
                        Err(e) => vec![file_error_violation(FILE_ERROR_RULE, &e.to_string())],
                    };
                    self.store(path, &violations);
                    (path.clone(), violations)
                })
                .collect()
        });

        let mut result = LintResult::new();
        for (name, violations) in pairs {
            result.add(name, violations);
        }
        result
    }

    /// Lint in-memory strings, keyed by identifier.
    pub fn lint_strings(&self, strings: &HashMap<String, String>, worker_pool_size: usize, workspace_headings: Option<&HashMap<String, Vec<String>>>) -> LintResult {
        self.lint_strings_inner(strings, worker_pool_size, workspace_headings, true)
    }

    fn lint_strings_inner(&self, strings: &HashMap<String, String>, worker_pool_size: usize, workspace_headings: Option<&HashMap<String, Vec<String>>>, honor_inline_config: bool) -> LintResult {
        let pool_size = if worker_pool_size == 0 { DEFAULT_WORKER_POOL_SIZE } else { worker_pool_size };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(pool_size)
            .build()
            .expect("failed to build lint worker pool");

        let entries: Vec<(&String, &String)> = strings.iter().collect();
        let pairs: Vec<(String, Vec<Violation>)> = pool.install(|| {
            entries
                .par_iter()
                .map(|(name, content)| {
                    if let Some(cached) = self.cached(name) {
                        return ((*name).clone(), cached);
                    }
                    let violations = self.lint_content_inner(name, content, workspace_headings, honor_inline_config);
                    self.store(name, &violations);
                    ((*name).clone(), violations)
                })
                .collect()
        });

        let mut result = LintResult::new();
        for (name, violations) in pairs {
            result.add(name, violations);
        }
        result
    }

    /// Lint the files and strings named in `options`, combined into one result.
    ///
    /// Honors `options.no_inline_config`: when set, `<!-- markdownlint-... -->`
    /// directives are parsed but never applied to suppress violations.
    pub fn lint(&self, options: &LintOptions) -> Result<LintResult> {
        let pool_size = if options.max_concurrency == 0 { DEFAULT_WORKER_POOL_SIZE } else { options.max_concurrency };
        let honor_inline_config = !options.no_inline_config;
        let mut result = self.lint_files_inner(&options.files, pool_size, options.cached_workspace_headings.as_ref(), honor_inline_config);
        let strings_result = self.lint_strings_inner(&options.strings, pool_size, options.cached_workspace_headings.as_ref(), honor_inline_config);
        for (name, violations) in strings_result {
            result.add(name, violations);
        }
        Ok(result)
    }

    fn cached(&self, identifier: &str) -> Option<Vec<Violation>> {
        self.cache.read().expect("lint result cache lock poisoned").get(identifier).cloned()
    }

    fn store(&self, identifier: &str, violations: &[Violation]) {
        self.cache
            .write()
            .expect("lint result cache lock poisoned")
            .insert(identifier.to_string(), violations.to_vec());
    }

    /// Lint `content` directly, bypassing the per-identifier cache.
    ///
    /// Used by the fix coordinator, which relints the same identifier across
    /// several passes as its content changes — a cache keyed only on
    /// identifier would otherwise serve stale violations. Always honors
    /// inline-config directives regardless of `LintOptions.no_inline_config`:
    /// fix-convergence passes call this directly with no `LintOptions` in
    /// hand, so there is nothing to consult. Go through [`Linter::lint`] for
    /// a no-inline-config-aware lint of a whole batch.
    pub fn lint_content(&self, identifier: &str, content: &str, workspace_headings: Option<&HashMap<String, Vec<String>>>) -> Vec<Violation> {
        self.lint_content_inner(identifier, content, workspace_headings, true)
    }

    fn lint_content_inner(&self, identifier: &str, content: &str, workspace_headings: Option<&HashMap<String, Vec<String>>>, honor_inline_config: bool) -> Vec<Violation> {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let fm_count = extract_front_matter_line_count(&lines, self.front_matter_pattern.as_deref());
        let front_matter_lines: &[&str] = &lines[..fm_count];

        let inline_config = InlineConfig::parse(&lines);

        let tokens = if self.engine.any_enabled_rule_needs_tokens() {
            parser::parse(content)
        } else {
            vec![]
        };

        let cancelled = AtomicBool::new(false);
        let mut violations = self.engine.lint(
            identifier,
            crate::VERSION,
            &lines,
            front_matter_lines,
            None,
            &tokens,
            workspace_headings,
            &cancelled,
        );

        if honor_inline_config && inline_config.has_directives {
            violations.retain(|v| !inline_config.is_disabled(v.line, &v.rule_names));
        }

        violations.sort_by_key(|v| v.line);
        violations
    }
}

fn file_error_violation(rule: &str, detail: &str) -> Violation {
    Violation {
        rule_names: vec![rule.to_string()],
        description: "could not read input".to_string(),
        severity: Severity::Error,
        error_detail: Some(detail.to_string()),
        line: 1,
        ..Default::default()
    }
}

/// Load configuration the way the CLI and library entry points do: explicit
/// config object, else explicit config file, else auto-discovery starting
/// from the first file's directory (or the current directory), with
/// `extends` resolved.
pub fn load_config(options: &LintOptions) -> Result<Config> {
    let config = if let Some(config) = &options.config {
        config.clone()
    } else if let Some(config_file) = &options.config_file {
        Config::from_file(config_file)?
    } else {
        let start = options
            .files
            .first()
            .and_then(|f| std::path::Path::new(f).parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        Config::discover(&start).unwrap_or_default()
    };

    config.resolve_extends()
}

/// Count the lines (including delimiters) making up a leading front-matter
/// block, or `0` if `pattern` is `None` or no closing delimiter is found.
///
/// Front matter is opt-in: without an explicit delimiter pattern, no lines
/// are treated as front matter.
fn extract_front_matter_line_count(lines: &[&str], pattern: Option<&str>) -> usize {
    if lines.is_empty() {
        return 0;
    }

    let first_line = lines[0].trim_end_matches(['\n', '\r']);

    let pattern_str = match pattern {
        Some(p) => p,
        None => return 0,
    };

    let Ok(regex) = regex::Regex::new(pattern_str) else {
        return 0;
    };
    if !regex.is_match(first_line) {
        return 0;
    }
    for (i, line) in lines.iter().enumerate().skip(1) {
        let line = line.trim_end_matches(['\n', '\r']);
        if regex.is_match(line) {
            return i + 1;
        }
    }
    0
}

/// Apply every violation's [`crate::types::FixInfo`] to `content`, bottom-up
/// (line descending, then column descending) so earlier edits never shift
/// the position of later ones.
pub fn apply_fixes(content: &str, violations: &[Violation]) -> String {
    use crate::types::FixInfo;

    let mut fixable: Vec<(usize, &FixInfo)> = violations
        .iter()
        .filter_map(|v| v.fix_info.as_ref().map(|fi| (fi.line_number.unwrap_or(v.line), fi)))
        .collect();

    if fixable.is_empty() {
        return content.to_string();
    }

    let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<String> = if line_ending == "\r\n" {
        content.split("\r\n").map(|s| s.to_string()).collect()
    } else {
        content.split('\n').map(|s| s.to_string()).collect()
    };

    if lines.last().is_some_and(|l| l.is_empty()) && content.ends_with(line_ending) {
        lines.pop();
    }

    fixable.sort_by(|a, b| {
        b.0.cmp(&a.0).then_with(|| {
            let col_b = b.1.edit_column.unwrap_or(1);
            let col_a = a.1.edit_column.unwrap_or(1);
            col_b.cmp(&col_a)
        })
    });

    let mut deleted_lines: std::collections::HashSet<usize> = std::collections::HashSet::new();
    let mut restructured_lines: std::collections::HashSet<usize> = std::collections::HashSet::new();

    for (line_num, fix) in &fixable {
        let line_idx = line_num.saturating_sub(1);

        if fix.delete_length == Some(-1) {
            if line_idx < lines.len() {
                deleted_lines.insert(line_idx);
            }
            continue;
        }

        if line_idx >= lines.len() || deleted_lines.contains(&line_idx) || restructured_lines.contains(&line_idx) {
            continue;
        }

        let line = &mut lines[line_idx];
        let col = fix.edit_column.unwrap_or(1);
        let col_idx = col.saturating_sub(1);

        let del = fix.delete_length.unwrap_or(0).max(0) as usize;
        if del > 0 && col_idx < line.len() {
            let end = (col_idx + del).min(line.len());
            line.replace_range(col_idx..end, "");
        }

        if let Some(text) = &fix.replace_text {
            let insert_pos = col_idx.min(line.len());
            if line_ending == "\r\n" && text.contains('\n') && !text.contains("\r\n") {
                line.insert_str(insert_pos, &text.replace('\n', "\r\n"));
            } else {
                line.insert_str(insert_pos, text);
            }
            if text.contains('\n') {
                restructured_lines.insert(line_idx);
            }
        }
    }

    if !deleted_lines.is_empty() {
        let mut idx = 0;
        lines.retain(|_| {
            let keep = !deleted_lines.contains(&idx);
            idx += 1;
            keep
        });
    }

    let mut result = lines.join(line_ending);
    if content.ends_with(line_ending) {
        result.push_str(line_ending);
    }
    result
}
