//! Terminal output utilities
//!
//! Colors go through `if_supports_color`, so piped output stays plain and
//! [`set_color`] can force it off.

use owo_colors::{OwoColorize, Stream};

/// Force colors off (or back to auto-detection).
pub fn set_color(enabled: bool) {
    if enabled {
        owo_colors::unset_override();
    } else {
        owo_colors::set_override(false);
    }
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!(
            "{} {}",
            "✓".if_supports_color(Stream::Stdout, |t| t.green()),
            message
        );
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!(
            "{} {}",
            "✗".if_supports_color(Stream::Stderr, |t| t.red()),
            message
        );
    }

    /// Print a failure on stdout, for results that are output rather than diagnostics
    pub fn failure(message: &str) {
        println!(
            "{} {}",
            "✗".if_supports_color(Stream::Stdout, |t| t.red()),
            message
        );
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!(
            "{} {}",
            "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()),
            message
        );
    }

    /// Print an indented `label: value` line
    pub fn field(label: &str, value: impl std::fmt::Display) {
        let label = format!("{label}:");
        println!(
            "  {} {value}",
            label.if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
    }

    /// Print an indented `label: value` line with the value in bold
    pub fn field_emphasis(label: &str, value: &str) {
        let label = format!("{label}:");
        println!(
            "  {} {}",
            label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
            value.if_supports_color(Stream::Stdout, |t| t.bold())
        );
    }
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format `width x height`
pub fn format_dimensions(width: impl std::fmt::Display, height: impl std::fmt::Display) -> String {
    format!("{width}x{height}")
}
