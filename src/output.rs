//! CLI output formatting.
//!
//! One line per file as the batch progresses, plus a closing summary. The
//! formatting lives here (returning `String`s) so the driver and CLI stay
//! printable-free of layout decisions and the format is unit testable.
//!
//! ```text
//! Image to overlay: /home/me/Desktop/logo.png
//! Source directory: /home/me/Desktop/images
//! Overlaying /home/me/Desktop/images/trip/001.jpg
//! ...
//! overlay: 14 images processed
//! ```

use crate::process::RunSummary;
use std::path::Path;

/// Header for an overlay run: which logo over which tree.
pub fn overlay_header(logo: &Path, dir: &Path) -> String {
    format!(
        "Image to overlay: {}\nSource directory: {}",
        logo.display(),
        dir.display()
    )
}

/// Header for thumbnail and convert runs.
pub fn run_header(mode: &str, dir: &Path) -> String {
    format!("{} directory: {}", mode, dir.display())
}

/// Per-file progress line.
pub fn file_line(verb: &str, path: &Path) -> String {
    format!("{} {}", verb, path.display())
}

/// Closing line for a finished run.
pub fn summary_line(mode: &str, summary: &RunSummary) -> String {
    let plural = if summary.processed == 1 { "" } else { "s" };
    format!("{}: {} image{} processed", mode, summary.processed, plural)
}
