//! `--explain <RULE>` handler — print per-rule documentation

use colored::Colorize;

/// Print a rule's description, tags, and documentation link to stdout.
pub(crate) fn explain_rule(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rule = match mdlint::rules::find_rule(name) {
        Some(r) => r,
        None => {
            eprintln!("{} unknown rule '{}'", "error:".red().bold(), name);
            suggest_similar_rules(name);
            std::process::exit(1);
        }
    };

    let names = rule.names();
    println!("{}", names[0].bold().cyan());
    if names.len() > 1 {
        println!("Aliases: {}", names[1..].join(", "));
    }
    println!();
    println!("{}", rule.description());

    let tags = rule.tags();
    if !tags.is_empty() {
        println!();
        println!("{} {}", "Tags:".bold(), tags.join(", "));
    }

    if let Some(url) = rule.information() {
        println!();
        println!("{} {}", "More information:".bold(), url);
    }

    Ok(())
}

/// Suggest rules with similar names on lookup failure.
fn suggest_similar_rules(name: &str) {
    let name_upper = name.to_uppercase();

    let mut suggestions: Vec<(&str, &str)> = Vec::new();
    for rule in mdlint::rules::get_rules().iter() {
        let names = rule.names();
        for n in names {
            if n.to_uppercase().contains(&name_upper) || name_upper.contains(&n.to_uppercase()) {
                suggestions.push((names[0], names.get(1).copied().unwrap_or("")));
                break;
            }
        }
    }

    if !suggestions.is_empty() {
        eprintln!("\nDid you mean one of these?");
        for (id, alias) in suggestions.iter().take(5) {
            if alias.is_empty() {
                eprintln!("  {}", id);
            } else {
                eprintln!("  {} ({})", id, alias);
            }
        }
    }
}
