//! Output formatting and styling module.
//!
//! Provides a centralized interface for all console output of a run: colored
//! step messages, the spinner shown while pushing, and the per-topic summary.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::Duration;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - A spinner for long-running git steps
/// - Summary tables with statistics
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use probsort::output::OutputFormatter;
    /// OutputFormatter::success("File moved successfully!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a ticking spinner with `message`. Call `finish_and_clear` when done.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use probsort::output::OutputFormatter;
    /// let spinner = OutputFormatter::spinner("Pushing to origin/main...");
    /// // ... long-running work ...
    /// spinner.finish_and_clear();
    /// ```
    pub fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints a summary table with file counts by topic.
    ///
    /// Topics are listed in the order given by `topic_order`; topics without
    /// files are omitted.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use probsort::output::OutputFormatter;
    /// use std::collections::BTreeMap;
    ///
    /// let mut counts = BTreeMap::new();
    /// counts.insert("0_Arrays_Hashing".to_string(), 2);
    /// counts.insert("6_Trees".to_string(), 1);
    /// let order = vec!["0_Arrays_Hashing".to_string(), "6_Trees".to_string()];
    /// OutputFormatter::summary_table(&counts, &order, 1);
    /// ```
    pub fn summary_table(
        topic_counts: &BTreeMap<String, usize>,
        topic_order: &[String],
        skipped: usize,
    ) {
        Self::header("SUMMARY");

        let rows: Vec<(&String, usize)> = topic_order
            .iter()
            .filter_map(|t| topic_counts.get(t).map(|c| (t, *c)))
            .collect();
        let total: usize = rows.iter().map(|(_, c)| c).sum();

        let width = rows
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(7);

        println!(
            "{:<width$} | {}",
            "Topic".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (topic, count) in &rows {
            println!(
                "{:<width$} | {} {}",
                topic,
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Moved".bold(),
            total.to_string().green().bold(),
            plural(total),
            width = width
        );
        if skipped > 0 {
            println!(
                "{:<width$} | {} {}",
                "Skipped".bold(),
                skipped.to_string().yellow(),
                plural(skipped),
                width = width
            );
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
