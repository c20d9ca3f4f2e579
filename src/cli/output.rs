use std::path::Path;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::models::algorithm::Algorithm;
use crate::core::models::outcome::{EncryptionOutcome, Payload};

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print a secondary, dimmed detail line.
pub fn detail(msg: &str) {
    println!("    {}", msg.dimmed());
}

/// `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.25 MB`: base 1024, two decimals at most.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

/// Percentage bar driven by the engine's progress callback.
pub fn progress_bar(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb.set_prefix(prefix.to_string());
    pb
}

/// Printed whenever RSA is selected.
pub fn rsa_warning() {
    eprintln!(
        "\n  {} {}",
        "⚠".yellow().bold(),
        "RSA mode stores the private key inside the encrypted output."
            .yellow()
            .bold()
    );
    eprintln!(
        "    {}",
        "Anyone holding the file can decrypt it. Use AES or ChaCha20 for real protection."
            .yellow()
    );
}

/// Print a single-file result.
pub fn file_result(action: &str, input: &Path, outcome: &EncryptionOutcome) {
    header(&format!("{action} completed"));
    detail(&format!("Input:  {}", input.display()));
    if let Some(Payload::Path(out)) = &outcome.payload {
        success(&format!("Saved to {}", out.display()));
    }
    if let Some(meta) = &outcome.metadata {
        detail(&format!(
            "Size: {} → {} ({})",
            format_file_size(meta.original_size),
            format_file_size(meta.encrypted_size),
            meta.algorithm
        ));
        if meta.original_size > 0 {
            let change = (meta.encrypted_size as f64 - meta.original_size as f64)
                / meta.original_size as f64
                * 100.0;
            if change > 0.0 {
                detail(&format!("Size increased by {change:.1}%"));
            } else if change < 0.0 {
                detail(&format!("Size reduced by {:.1}%", change.abs()));
            }
        }
    }
}

/// Print a batch (directory or multi-file) result, including every failed file.
pub fn batch_result(action: &str, input: &str, outcome: &EncryptionOutcome) {
    let total = outcome.items.len();
    let failed: Vec<_> = outcome.failed_items().collect();

    if outcome.success {
        header(&format!("{action} completed"));
    } else {
        header(&format!("{action} finished with errors"));
    }
    detail(&format!("Input:  {input}"));
    if let Some(Payload::Path(out)) = &outcome.payload {
        detail(&format!("Output: {}", out.display()));
    }

    let processed = total - failed.len();
    if failed.is_empty() {
        success(&format!("Files processed: {processed}"));
    } else {
        warning(&format!("Files processed: {processed} of {total}"));
    }
    if let Some(meta) = &outcome.metadata {
        detail(&format!(
            "Total size: {} → {} ({})",
            format_file_size(meta.original_size),
            format_file_size(meta.encrypted_size),
            meta.algorithm
        ));
    }

    for item in failed {
        error(&format!(
            "{}: {}",
            item.source.display(),
            item.outcome
                .error_message
                .as_deref()
                .unwrap_or("unknown error")
                .lines()
                .next()
                .unwrap_or_default()
        ));
    }
}

/// One-line description used by the `algorithms` listing.
pub fn algorithm_line(algorithm: Algorithm, summary: &str) {
    println!("  {:<10} {}", algorithm.as_str().cyan().bold(), summary);
}
