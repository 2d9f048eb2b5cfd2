// src/utils/log.rs

//! Console reporting for CLI runs.
//!
//! Diagnostics go through the `log` facade; this module prints the
//! user-facing report (headers, feed lines, summaries) with a timestamp
//! prefix, and can be silenced with `--quiet`.

use std::sync::OnceLock;

use chrono::Local;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Silence report output for the rest of the process.
pub fn init(quiet: bool) {
    let _ = QUIET.set(quiet);
}

fn enabled() -> bool {
    !QUIET.get().copied().unwrap_or(false)
}

/// Format a report line with a timestamp and tag.
fn format_line(tag: &str, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{timestamp}] [{tag}] {message}")
}

/// Print an informational line.
pub fn info(message: &str) {
    if enabled() {
        println!("{}", format_line("INFO", message));
    }
}

/// Print a success line.
pub fn success(message: &str) {
    if enabled() {
        println!("{}", format_line("INFO", &format!("✓ {message}")));
    }
}

/// Print a boxed section header.
pub fn header(title: &str) {
    if enabled() {
        let border = "═".repeat(60);
        println!("{}", format_line("INFO", &border));
        println!("{}", format_line("INFO", &format!("  {title}")));
        println!("{}", format_line("INFO", &border));
    }
}

/// Print an error line to stderr. Never silenced.
pub fn error(message: &str) {
    eprintln!("{}", format_line("ERROR", message));
}

/// Print an indented item under the current section.
pub fn sub_item(message: &str) {
    if enabled() {
        println!("{}", format_line("INFO", &format!("    {message}")));
    }
}

/// Print a titled list of key/value pairs.
pub fn summary(title: &str, items: &[(&str, String)]) {
    if enabled() {
        println!("{}", format_line("SUMMARY", title));
        for (key, value) in items {
            println!("{}", format_line("SUMMARY", &format!("    {key}: {value}")));
        }
    }
}
