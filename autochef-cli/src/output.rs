//! Terminal output
//!
//! Colored rendering of reports, detection results and the catalog.

use autochef_core::catalog::{Catalog, CatalogItem};
use autochef_core::domain::candidate::{CandidateStatus, SearchReport};
use autochef_core::domain::detection::DetectionResult;
use autochef_core::domain::transform::BakeOutput;
use colored::*;

const UNKNOWN_PREFIX: &str = "Sorry, I don't know this one, yet. Good luck!";

/// Print a search report: the detected prefix, then every hit
pub fn print_report(report: &SearchReport, show_all: bool) {
    println!();
    println!(
        "{}",
        "****************** LIKELY SUSPECTS ARE ******************".cyan()
    );
    println!();

    match report.prefix_label() {
        Some(label) => println!("{} {}", "Magic Function is:".green(), label.bright_green()),
        None => println!("{}", UNKNOWN_PREFIX.yellow()),
    }
    println!();

    if report.hit_count() == 0 {
        if report.prefix_label().is_some() {
            println!(
                "{}",
                "No catalog operation produced recognizable output.".yellow()
            );
        }
    } else {
        for (label, output) in report.hits() {
            println!("{}", label.green().bold());
            println!("{}", output.blue());
            println!();
        }
    }

    if show_all {
        println!("{}", "All candidates:".bold());
        for candidate in &report.candidates {
            println!(
                "  {:>3}  {:<10} {}",
                candidate.index,
                status_tag(&candidate.status),
                candidate.label
            );
            if let CandidateStatus::Failed { reason } | CandidateStatus::Skipped { reason } =
                &candidate.status
            {
                println!("       {}", reason.dimmed());
            }
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "{} hit(s), {} of {} candidate(s) evaluated",
            report.hit_count(),
            report.evaluated(),
            report.candidates.len()
        )
        .dimmed()
    );
}

/// Colorize a candidate status for display
fn status_tag(status: &CandidateStatus) -> ColoredString {
    match status {
        CandidateStatus::Hit { .. } => "hit".green(),
        CandidateStatus::Miss => "miss".normal(),
        CandidateStatus::Failed { .. } => "failed".red(),
        CandidateStatus::Skipped { .. } => "skipped".yellow(),
    }
}

/// Print ranked detection candidates
pub fn print_detection(detection: &DetectionResult) {
    if detection.is_empty() {
        println!("{}", UNKNOWN_PREFIX.yellow());
        return;
    }

    println!(
        "{}",
        format!("Found {} candidate recipe(s):", detection.candidates.len()).bold()
    );
    println!();
    for (rank, candidate) in detection.candidates.iter().enumerate() {
        let summary = if candidate.recipe.is_empty() {
            "(no operations)".to_string()
        } else {
            candidate.recipe.summary()
        };
        println!("  {} #{} {}", "▸".cyan(), rank, summary.bold());
        if let Some(entropy) = candidate.entropy {
            println!("    Entropy: {}", format!("{:.3}", entropy).dimmed());
        }
        if let Some(preview) = &candidate.preview {
            println!("    Preview: {}", preview.dimmed());
        }
    }
}

/// Print the output of a single bake
pub fn print_bake_output(output: &BakeOutput) {
    println!("{}", format!("Output ({}):", output.output_type).bold());
    println!("{}", output.text().blue());
}

/// Print the catalog, one entry per line
pub fn print_catalog(catalog: &Catalog) {
    println!(
        "{}",
        format!("Catalog has {} entr(ies):", catalog.len()).bold()
    );
    println!();
    for (index, item) in catalog.items().iter().enumerate() {
        match item {
            CatalogItem::Entry(entry) => {
                let slots: Vec<String> = entry.slots().map(|s| s.slot.to_string()).collect();
                if slots.is_empty() {
                    println!("  {:>3}  {}", index, entry.op);
                } else {
                    println!(
                        "  {:>3}  {} {}",
                        index,
                        entry.op,
                        format!("[{}]", slots.join(", ")).dimmed()
                    );
                }
            }
            CatalogItem::Malformed { label, reason } => {
                println!("  {:>3}  {} {}", index, label.red(), "(malformed)".red());
                println!("       {}", reason.dimmed());
            }
        }
    }
}
