//! Core linting logic — lint files once (used by watch mode and normal mode)

use super::args::{Args, OutputFormat};
use super::files::{expand_paths, filter_ignored};
use mdlint::{LintOptions, Linter, apply_fixes, formatters};

/// Lint files once (used by watch mode and normal mode)
pub(crate) fn lint_files_once(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    use colored::Colorize;

    // Expand directories and filter ignored files
    let files = expand_paths(&args.files);
    let files = filter_ignored(files, &args.ignore)?;

    if files.is_empty() {
        if !args.quiet {
            println!("No files to lint.");
        }
        return Ok(());
    }

    // Build configuration
    let mut config = if let Some(ref config_path) = args.config {
        mdlint::Config::from_file(config_path)?
    } else {
        mdlint::Config::default()
    };

    // Apply --enable and --disable flags
    use mdlint::RuleConfig;
    for rule in &args.enable {
        config
            .rules
            .insert(rule.to_uppercase(), RuleConfig::Enabled(true));
    }
    for rule in &args.disable {
        config
            .rules
            .insert(rule.to_uppercase(), RuleConfig::Enabled(false));
    }

    // Apply --preset flag
    if let Some(ref preset_name) = args.preset {
        config.preset = Some(preset_name.clone());
    }
    config.apply_preset();

    let options = LintOptions {
        files: files.clone(),
        strings: std::collections::HashMap::new(),
        config: Some(config.clone()),
        no_inline_config: args.no_inline_config,
        ..Default::default()
    };

    let linter = Linter::new(&config, None, Vec::new())?;
    let results = linter.lint(&options)?;

    // Pre-build workspace heading index once for convergence passes (fix/dry-run)
    let cached_headings = if files.len() > 1 && (args.fix || args.fix_dry_run) {
        Some(mdlint::fixer::build_workspace_heading_index(&files))
    } else {
        None
    };

    // Handle --fix-dry-run: show what would change without writing
    if args.fix_dry_run {
        let mut would_fix_count = 0;
        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            let mut current = content.clone();

            // Multi-pass fix convergence for dry-run preview
            for _pass in 0..10 {
                // DEFAULT_FIX_PASSES = 10
                let pass_errors =
                    linter.lint_content(file_path, &current, cached_headings.as_ref());

                let next = apply_fixes(&current, &pass_errors);
                if next == current {
                    break; // Converged
                }
                current = next;
            }

            if current != content {
                would_fix_count += 1;
                if !args.quiet {
                    println!("{} {}", "Would fix:".yellow().bold(), file_path);
                    // Re-lint final result to show what errors would be fixed
                    let original_errors = results.get(file_path).unwrap_or(&[]);

                    // Show errors that had fixes
                    for error in original_errors.iter().filter(|e| e.fix_info.is_some()) {
                        let rule = error.rule_names.first().map(String::as_str).unwrap_or("?");
                        println!("  line {}: {} {}", error.line, rule.yellow(), error.description);
                    }
                }
            }
        }

        if !args.quiet {
            if would_fix_count > 0 {
                println!(
                    "\n{} {} file(s) would be fixed (run with {} to apply).",
                    "»".yellow().bold(),
                    would_fix_count.to_string().yellow(),
                    "--fix".bold()
                );
            } else {
                println!("{}", "No fixable issues found.".dimmed());
            }
        }
        // Exit 1 if there are fixable issues (useful for CI), 0 if clean
        if would_fix_count > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Handle auto-fix
    if args.fix {
        let mut fixed_count = 0;
        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            let mut current = content.clone();

            // Multi-pass fix convergence: re-lint and re-fix until stable
            for _pass in 0..10 {
                // DEFAULT_FIX_PASSES = 10
                let pass_errors =
                    linter.lint_content(file_path, &current, cached_headings.as_ref());

                let next = apply_fixes(&current, &pass_errors);
                if next == current {
                    break; // Converged
                }
                current = next;
            }

            if current != content {
                std::fs::write(file_path, &current)?;
                fixed_count += 1;
                if args.verbose || !args.quiet {
                    println!("{} {}", "Fixed:".green().bold(), file_path);
                }
            }
        }

        if !args.quiet {
            if fixed_count > 0 {
                println!(
                    "{} {} file(s) fixed.",
                    "✓".green().bold(),
                    fixed_count.to_string().green()
                );
            } else {
                println!("{}", "No fixable issues found.".dimmed());
            }
        }
    } else if results.is_empty() {
        if !args.quiet {
            println!("{} No errors found!", "✓".green().bold());
        }
    } else {
        // Display errors
        if args.quiet {
            for (file, errors) in &results.results {
                if !errors.is_empty() {
                    println!("{}", file);
                }
            }
        } else {
            let output = match args.output_format {
                OutputFormat::Text => {
                    let mut sources = std::collections::HashMap::new();
                    for file in &files {
                        if let Ok(content) = std::fs::read_to_string(file) {
                            sources.insert(file.clone(), content);
                        }
                    }
                    formatters::format_text_with_context(&results, &sources)
                }
                OutputFormat::Json => formatters::format_json(&results),
                OutputFormat::Sarif => formatters::format_sarif(&results),
                OutputFormat::Github => formatters::format_github(&results),
            };
            print!("{}", output);
        }

        // In watch mode, don't return error - just continue watching
        if args.watch {
            return Ok(());
        }
    }

    Ok(())
}
