use super::result::StatsResult;
use crate::model::{ReportOutput, SCHEMA_VERSION};
use crate::window::ScanWindow;
use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use console::style;
use std::collections::HashMap;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const GRID_ROWS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const TOP_AUTHORS: usize = 20;

pub fn output_json(results: &[StatsResult]) -> Result<()> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        results: results.iter().map(StatsResult::to_report).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_dashboard(result: &StatsResult) -> Result<()> {
    println!();
    println!("{} {}", style("Folder:").bold(), result.folder());

    let Some(window) = result.window else {
        if let Some(err) = &result.error {
            println!("{} {}", style("Error:").red().bold(), err);
        }
        return Ok(());
    };

    println!(
        "From {} to {} ({} days)",
        style(window.begin.format("%Y-%m-%d")).dim(),
        style(window.end.format("%Y-%m-%d")).dim(),
        window.total_days
    );
    if let Some(err) = &result.error {
        println!("{} {}", style("Error:").red().bold(), err);
    }
    println!("{}", "─".repeat(60));

    print_grid(result, &window);
    print_histogram("Commits by hour", (0..24).map(|h| format!("{h:02}h")), &result.hour_commits);
    print_histogram("Commits by weekday", WEEKDAYS.iter().map(|d| d.to_string()), &result.weekday_commits);
    print_authors(result);
    Ok(())
}

fn intensity(count: u32, max: u32) -> &'static str {
    if count == 0 {
        return "·";
    }
    match ((count as f64 / max.max(1) as f64) * 4.0).ceil() as u32 {
        0 | 1 => "░",
        2 => "▒",
        3 => "▓",
        _ => "█",
    }
}

fn print_grid(result: &StatsResult, window: &ScanWindow) {
    let mut per_day: HashMap<NaiveDate, u32> = HashMap::new();
    for (index, &count) in result.day_commits.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if let Some(date) = window.bucket_date(index as i64) {
            *per_day.entry(date).or_insert(0) += count;
        }
    }
    let max = per_day.values().copied().max().unwrap_or(0);
    let first = window.begin.date_naive();
    let weeks = (window.total_days / 7) as u64;

    println!("{}", style("Contributions").bold());
    for (row, label) in GRID_ROWS.iter().enumerate() {
        let cells: String = (0..weeks)
            .map(|week| {
                let count = first
                    .checked_add_days(Days::new(week * 7 + row as u64))
                    .and_then(|date| per_day.get(&date).copied())
                    .unwrap_or(0);
                intensity(count, max)
            })
            .collect();
        println!("  {label} {}", style(cells).green());
    }
    println!(
        "  {} commits in range, {} {}",
        style(result.commit_count()).cyan(),
        style("less").dim(),
        style("·░▒▓█ more").green()
    );
}

fn print_histogram<I: Iterator<Item = String>>(title: &str, labels: I, counts: &[u32]) {
    let max = counts.iter().copied().max().unwrap_or(0);
    println!("\n{}", style(title).bold());
    for (label, &count) in labels.zip(counts) {
        let width = if max == 0 { 0 } else { (count as usize * 40).div_ceil(max as usize) };
        println!("  {label:>3} {} {count}", style("█".repeat(width)).blue());
    }
}

fn print_authors(result: &StatsResult) {
    let authors = result.ledger.ranked();
    println!("\n{}", style("Authors").bold());
    if authors.is_empty() {
        println!("  No contributions in range");
        return;
    }
    println!(
        "  {:<40} {:>10} {:>10}",
        style("Name").bold(),
        style("Added").bold(),
        style("Deleted").bold()
    );
    for author in authors.iter().take(TOP_AUTHORS) {
        println!(
            "  {:<40} {:>10} {:>10}",
            author.name,
            style(format!("+{}", author.additions)).green(),
            style(format!("-{}", author.deletions)).red()
        );
    }
    if authors.len() > TOP_AUTHORS {
        println!("  ... and {} more authors", authors.len() - TOP_AUTHORS);
    }
}
