//! Inline `<!-- markdownlint-... -->` directive parsing.
//!
//! Uses a snapshot-based approach: instead of cloning rule ID strings into
//! per-line HashSets, directive events are stored once and `is_disabled()`
//! replays them lazily.

use std::collections::HashSet;

/// Parsed inline configuration state for one document.
///
/// Supports:
/// - `<!-- markdownlint-disable MD001 MD002 -->` — disable specific rules
/// - `<!-- markdownlint-disable -->` — disable all rules
/// - `<!-- markdownlint-enable MD001 -->` — re-enable specific rules
/// - `<!-- markdownlint-enable -->` — re-enable all rules
/// - `<!-- markdownlint-disable-next-line MD001 -->` — disable for next line only
/// - `<!-- markdownlint-disable-file MD001 -->` — disable for entire file
/// - `<!-- markdownlint-enable-file MD001 -->` — re-enable for rest of file
pub struct InlineConfig {
    /// Whether any directives were found (fast path for skipping the filter).
    pub has_directives: bool,
    /// Sorted directive events `(line_number, event)`.
    events: Vec<(usize, DirectiveEvent)>,
}

enum DirectiveEvent {
    Disable(Vec<String>),
    Enable(Vec<String>),
    DisableNextLine(Vec<String>),
    DisableFile(Vec<String>),
    EnableFile(Vec<String>),
}

enum Directive {
    Disable(Vec<String>),
    Enable(Vec<String>),
    DisableNextLine(Vec<String>),
    DisableFile(Vec<String>),
    EnableFile(Vec<String>),
}

impl InlineConfig {
    /// Parse inline directives from document lines.
    pub fn parse(lines: &[&str]) -> Self {
        let mut has_directives = false;
        let mut events = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            if let Some(directive) = Self::parse_directive(trimmed) {
                has_directives = true;
                let event = match directive {
                    Directive::Disable(rules) => DirectiveEvent::Disable(rules),
                    Directive::Enable(rules) => DirectiveEvent::Enable(rules),
                    Directive::DisableNextLine(rules) => DirectiveEvent::DisableNextLine(rules),
                    Directive::DisableFile(rules) => DirectiveEvent::DisableFile(rules),
                    Directive::EnableFile(rules) => DirectiveEvent::EnableFile(rules),
                };
                events.push((line_number, event));
            }
        }

        InlineConfig { has_directives, events }
    }

    /// Whether any rule in `rule_names` is suppressed at `line_number`.
    pub fn is_disabled(&self, line_number: usize, rule_names: &[String]) -> bool {
        // `disable-file`/`enable-file` scope the whole document, so their net
        // effect is computed over every event regardless of where it falls
        // relative to `line_number` — a disable-file comment at the bottom of
        // the file still suppresses a violation on line 1.
        let mut file_disabled: HashSet<&str> = HashSet::new();
        for (_, event) in &self.events {
            match event {
                DirectiveEvent::DisableFile(rules) => {
                    if rules.is_empty() {
                        file_disabled.insert("");
                    } else {
                        for r in rules {
                            file_disabled.insert(r);
                        }
                    }
                }
                DirectiveEvent::EnableFile(rules) => {
                    if rules.is_empty() {
                        file_disabled.clear();
                    } else {
                        for r in rules {
                            file_disabled.remove(r.as_str());
                        }
                    }
                }
                _ => {}
            }
        }

        if file_disabled.contains("") || Self::any_matches(&file_disabled, rule_names) {
            return true;
        }

        // `disable`/`enable`/`disable-next-line` are position-dependent block
        // and line-scoped directives, so only events before `line_number` count.
        let mut active_disabled: HashSet<&str> = HashSet::new();
        // Multiple `disable-next-line` comments can stack immediately above the
        // same target line, each naming different rules, so every one that
        // fires before `line_number` is kept rather than just the last.
        let mut disable_next_line: Vec<(usize, &[String])> = Vec::new();

        for (event_line, event) in &self.events {
            if *event_line >= line_number {
                break;
            }
            match event {
                DirectiveEvent::Disable(rules) => {
                    if rules.is_empty() {
                        active_disabled.insert("");
                    } else {
                        for r in rules {
                            active_disabled.insert(r);
                        }
                    }
                }
                DirectiveEvent::Enable(rules) => {
                    if rules.is_empty() {
                        active_disabled.clear();
                    } else {
                        for r in rules {
                            active_disabled.remove(r.as_str());
                        }
                    }
                }
                DirectiveEvent::DisableNextLine(rules) => {
                    disable_next_line.push((*event_line, rules));
                }
                DirectiveEvent::DisableFile(_) | DirectiveEvent::EnableFile(_) => {}
            }
        }

        if active_disabled.contains("") || Self::any_matches(&active_disabled, rule_names) {
            return true;
        }

        for (dnl_line, rules) in disable_next_line {
            let next_non_directive = self.find_next_non_directive_line(dnl_line);
            if next_non_directive == Some(line_number) {
                if rules.is_empty() {
                    return true;
                }
                if rule_names
                    .iter()
                    .any(|name| rules.iter().any(|r| r.eq_ignore_ascii_case(name)))
                {
                    return true;
                }
            }
        }

        false
    }

    /// Whether any of `rule_names` (names or aliases, any case) appears in `disabled`.
    ///
    /// Directive rule names are stored upper-cased by [`Self::parse_rule_list`];
    /// `rule_names` carries a rule's canonical names/aliases verbatim (e.g.
    /// `"MD013"` and `"line-length"`), so the comparison upper-cases each one.
    fn any_matches(disabled: &HashSet<&str>, rule_names: &[String]) -> bool {
        rule_names
            .iter()
            .any(|name| disabled.contains(name.to_uppercase().as_str()))
    }

    fn find_next_non_directive_line(&self, after_line: usize) -> Option<usize> {
        let directive_lines: HashSet<usize> = self.events.iter().map(|(l, _)| *l).collect();
        let mut line = after_line + 1;
        while directive_lines.contains(&line) {
            line += 1;
        }
        Some(line)
    }

    fn parse_directive(line: &str) -> Option<Directive> {
        let inner = line.strip_prefix("<!--")?.strip_suffix("-->")?.trim();

        if let Some(rest) = inner.strip_prefix("markdownlint-disable-next-line") {
            Some(Directive::DisableNextLine(Self::parse_rule_list(rest)))
        } else if let Some(rest) = inner.strip_prefix("markdownlint-disable-file") {
            Some(Directive::DisableFile(Self::parse_rule_list(rest)))
        } else if let Some(rest) = inner.strip_prefix("markdownlint-enable-file") {
            Some(Directive::EnableFile(Self::parse_rule_list(rest)))
        } else if let Some(rest) = inner.strip_prefix("markdownlint-disable") {
            Some(Directive::Disable(Self::parse_rule_list(rest)))
        } else if let Some(rest) = inner.strip_prefix("markdownlint-enable") {
            Some(Directive::Enable(Self::parse_rule_list(rest)))
        } else {
            None
        }
    }

    fn parse_rule_list(s: &str) -> Vec<String> {
        s.split_whitespace().map(|r| r.to_uppercase()).collect()
    }
}
