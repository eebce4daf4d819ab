//! Terminal output for the command line front end.
//!
//! Colored status lines, a progress bar for the lookup loop and the final
//! run summary.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::models::ResultTable;

/// Characters of the title shown in progress messages
const PROGRESS_TITLE_CHARS: usize = 50;

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => println!("{} {}", icon.red().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// `Processing 3/120: <first 50 characters of the title>...`
pub fn progress_message(position: usize, total: usize, title: &str) -> String {
    let head: String = title.chars().take(PROGRESS_TITLE_CHARS).collect();
    format!("Processing {}/{}: {}...", position, total, head)
}

/// Format a number with thousands separators.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Progress bar over the preprint lookups
pub struct MatchProgress {
    pb: ProgressBar,
}

impl MatchProgress {
    /// Create a bar for `total` lookups; `hidden` suppresses all drawing
    pub fn new(total: usize, hidden: bool) -> Self {
        let pb = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        let style = ProgressStyle::with_template("{msg}\n{spinner:.cyan} {bar:40.cyan/blue} {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ ");
        pb.set_style(style);

        Self { pb }
    }

    /// Announce the lookup about to run
    pub fn update(&self, position: usize, total: usize, title: &str) {
        self.pb.set_position(position.saturating_sub(1) as u64);
        self.pb.set_message(progress_message(position, total, title));
    }

    pub fn finish(&self, matched: usize, total: usize) {
        self.pb.set_position(total as u64);
        self.pb
            .finish_with_message(format!("✓ Found {} of {} papers on arXiv", matched, total));
    }
}

/// Print the end-of-run summary
pub fn print_summary(table: &ResultTable, path: &Path) {
    println!();
    println!("{}", "Summary".bold().underline());
    println!("  {:<14} {}", "Papers:".dimmed(), format_number(table.len()));
    println!(
        "  {:<14} {}",
        "On arXiv:".dimmed(),
        format_number(table.matched_count()).green()
    );
    println!(
        "  {:<14} {}",
        "Not found:".dimmed(),
        format_number(table.len() - table.matched_count()).yellow()
    );
    print_status(
        Status::Success,
        &format!("Results saved to {}", path.display().bright_blue()),
    );
}
