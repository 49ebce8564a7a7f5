//! Terminal progress helpers.
//!
//! Uses `indicatif` to show a spinner while the page loads. Spinners draw to
//! stderr and disappear when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Braille dots.
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create an animated spinner with the given message.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars(TICK_CHARS)
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Remove the spinner line once the awaited work settled.
pub fn finish(pb: &ProgressBar) {
    pb.finish_and_clear();
}
