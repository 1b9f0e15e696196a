//! Progress indicators

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate progress.
///
/// The spinner draws on stderr and is hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner shown while an object is fetched.
pub fn fetch_spinner(bucket: &str, key: &str) -> ProgressBar {
    spinner(&format!("Fetching s3://{bucket}/{key}"))
}
