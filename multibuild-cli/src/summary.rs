//! End-of-run summary, as a table or as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use multibuild_core::ProcessOptions;
use multibuild_engine::{RepoStatus, RunReport};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "updated")]
    updated: &'static str,
    #[tabled(rename = "result")]
    result: String,
    #[tabled(rename = "path")]
    path: String,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    options: &'a ProcessOptions,
    built: usize,
    skipped: usize,
    failed: usize,
    #[serde(flatten)]
    report: &'a RunReport,
}

pub fn print_json(options: &ProcessOptions, report: &RunReport) -> Result<()> {
    let payload = SummaryJson {
        options,
        built: report.built(),
        skipped: report.skipped(),
        failed: report.failed(),
        report,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize run summary")?
    );
    Ok(())
}

pub fn print_table(report: &RunReport) {
    if report.repositories.is_empty() {
        println!("No repositories selected.");
        return;
    }

    let rows: Vec<SummaryRow> = report
        .repositories
        .iter()
        .map(|r| SummaryRow {
            repository: r.label.clone(),
            updated: if r.updated { "yes" } else { "no" },
            result: status_label(&r.status),
            path: r.path.display().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    println!(
        "{} built | {} skipped | {} failed",
        report.built().to_string().green().bold(),
        report.skipped().to_string().yellow().bold(),
        report.failed().to_string().red().bold(),
    );
    for r in &report.repositories {
        if let RepoStatus::Failed { reason } = &r.status {
            println!("  {} {}: {reason}", "✗".red().bold(), r.label);
        }
    }
}

fn status_label(status: &RepoStatus) -> String {
    match status {
        RepoStatus::Built => "BUILT".green().to_string(),
        RepoStatus::Skipped => "SKIPPED".yellow().to_string(),
        RepoStatus::Failed { .. } => "FAILED".red().to_string(),
    }
}
