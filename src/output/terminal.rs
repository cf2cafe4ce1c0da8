// Colored terminal output for analysis results, rule listings and bottles.
//
// main.rs delegates all terminal formatting here.

use colored::Colorize;

use crate::db::models::Bottle;
use crate::moderation::{AnalysisResult, Rejection, RuleCatalog, Severity};

/// Display a full analysis of one piece of text.
pub fn display_analysis(text: &str, result: &AnalysisResult) {
    println!("\n{}", "=== Moderation Analysis ===".bold());
    println!("  Text: {}", super::truncate_chars(text, 120).dimmed());

    let verdict = if result.is_flagged {
        "FLAGGED".red().bold()
    } else {
        "clean".green()
    };
    println!("  Verdict: {verdict}");
    println!(
        "  Score: {:.2} (threshold {:.2})  Severity: {}",
        result.total_score,
        result.threshold,
        colorize_severity(result.overall_severity)
    );

    if result.matches.is_empty() {
        println!("  No rules matched.");
    } else {
        println!("\n  {} detection(s):", result.matches.len());
        for m in &result.matches {
            println!(
                "    #{:<3} {:<30} {:<15} {:<10} {:.2}  \"{}\" [{}-{}]",
                m.rule.number,
                m.rule.description,
                m.rule.category.as_str(),
                colorize_severity(m.rule.severity),
                m.rule.confidence,
                m.matched_text,
                m.start,
                m.end,
            );
        }
    }

    if let Some(ref trace) = result.trace {
        println!("\n{}", "--- Debug trace ---".dimmed());
        print!("{}", trace.dimmed());
    }
    println!();
}

/// Display a rejection from the creation workflow.
pub fn display_rejection(rejection: &Rejection) {
    println!(
        "{} {} (field: {})",
        "Blocked:".red().bold(),
        rejection.message,
        rejection.field
    );
}

/// List every rule in the catalog.
pub fn display_rules(catalog: &RuleCatalog) {
    println!(
        "\n{}",
        format!("=== Rule Catalog ({} rules) ===", catalog.len()).bold()
    );
    println!(
        "  {:>4}  {:<30} {:<15} {:<10} {:>5}",
        "#".dimmed(),
        "Description".dimmed(),
        "Category".dimmed(),
        "Severity".dimmed(),
        "Conf".dimmed(),
    );
    println!("  {}", "-".repeat(70).dimmed());

    for rule in catalog.iter() {
        println!(
            "  {:>4}  {:<30} {:<15} {:<10} {:>5.2}",
            rule.number,
            rule.description,
            rule.category.as_str(),
            colorize_severity(rule.severity),
            rule.confidence,
        );
    }
    println!();
}

/// Display a list of bottles.
pub fn display_bottles(bottles: &[Bottle]) {
    if bottles.is_empty() {
        println!("No bottles yet. Run `castaway create \"...\"` to toss one in.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Bottles ({}) ===", bottles.len()).bold()
    );
    for bottle in bottles {
        let author = bottle.author.as_deref().unwrap_or("anonymous");
        let from = bottle
            .location_from
            .as_deref()
            .map(|l| format!(" from {l}"))
            .unwrap_or_default();
        println!(
            "  {:>5}. [tag {}] {}  {}",
            bottle.id,
            bottle.tag_id,
            super::truncate_chars(&bottle.content, 100),
            format!("by {author}{from}, {}", bottle.created_at).dimmed()
        );
    }
    println!();
}

/// Colorize a severity label.
fn colorize_severity(severity: Severity) -> colored::ColoredString {
    let label = severity.as_str();
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.bright_red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.green(),
    }
}
