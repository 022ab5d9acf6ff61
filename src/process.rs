//! Batch driver.
//!
//! Three run modes over a directory tree of images:
//!
//! - [`overlay_run`] — composite a proportionally scaled logo onto the
//!   center of every image, rewriting each file in place.
//! - [`thumbnail_run`] — replace every image with its thumbnail.
//! - [`convert_run`] — re-encode every image into a sibling
//!   `output_<ext>` directory, mirroring relative paths.
//!
//! Processing is single-threaded and synchronous: each file runs to
//! completion before the next starts, and the first error propagates out of
//! the run (terminating the batch with nonzero exit status from the CLI).
//! The decoded logo is reused read-only across all files of an overlay run;
//! every base image is decoded, mutated, and persisted independently, so a
//! failed file leaves no shared state behind.

use crate::config::BatchConfig;
use crate::imaging::{
    AlphaMask, CodecError, ComposeError, RasterBuffer, ScaleError, blend, center_offset,
    decode_image, encode_image, scale_overlay,
};
use crate::output;
use crate::scan::{self, ScanError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("codec failed: {0}")]
    Codec(#[from] CodecError),
    #[error("scaling failed: {0}")]
    Scale(#[from] ScaleError),
    #[error("compositing failed: {0}")]
    Compose(#[from] ComposeError),
}

/// What a batch run touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
}

/// The alpha mask for a scaled overlay: its 4th channel scaled to `[0, 1]`
/// when it has one, fully opaque otherwise.
fn overlay_mask(overlay: &RasterBuffer) -> AlphaMask {
    AlphaMask::from_channel(overlay, 3)
        .unwrap_or_else(|| AlphaMask::opaque(overlay.width(), overlay.height()))
}

/// Composite `logo_path` onto the center of every image under `root`,
/// rewriting each file in place in its own format.
///
/// The logo is decoded once and rescaled per image so its width is
/// `image_width / overlay_divider`.
pub fn overlay_run(
    logo_path: &Path,
    root: &Path,
    config: &BatchConfig,
) -> Result<RunSummary, ProcessError> {
    let logo = decode_image(logo_path)?;
    let options = config.format_options();
    let mut summary = RunSummary::default();

    for path in scan::list_image_files(root, &config.extensions)? {
        println!("{}", output::file_line("Overlaying", &path));
        let mut base = decode_image(&path)?;

        let scaled = scale_overlay(&logo, &base, config.overlay_divider)?;
        let mask = overlay_mask(&scaled);
        let offset = center_offset(&base, &scaled);
        blend(&mut base, &scaled, offset, &mask)?;

        encode_image(&path, &base, &options)?;
        summary.processed += 1;
    }

    Ok(summary)
}

/// Replace every image under `root` with its thumbnail, in place.
pub fn thumbnail_run(root: &Path, config: &BatchConfig) -> Result<RunSummary, ProcessError> {
    let options = config.format_options();
    let mut summary = RunSummary::default();

    for path in scan::list_image_files(root, &config.extensions)? {
        println!("{}", output::file_line("Thumbnailing", &path));
        let image = decode_image(&path)?;
        let thumb = crate::imaging::resize(&image, config.thumb_shape(), config.keep_aspect_ratio)?;
        encode_image(&path, &thumb, &options)?;
        summary.processed += 1;
    }

    Ok(summary)
}

/// Where a convert run writes: an `output_<ext>` directory next to `root`.
pub fn convert_output_dir(root: &Path, extension: &str) -> PathBuf {
    let name = format!("output_{extension}");
    match root.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

/// Re-encode every image under `root` as `output_extension`, mirroring the
/// tree's relative paths under [`convert_output_dir`]. Sources are left
/// untouched.
pub fn convert_run(root: &Path, config: &BatchConfig) -> Result<RunSummary, ProcessError> {
    let out_root = convert_output_dir(root, &config.output_extension);
    std::fs::create_dir_all(&out_root)?;
    let options = config.format_options();
    let mut summary = RunSummary::default();

    for path in scan::list_image_files(root, &config.extensions)? {
        println!("{}", output::file_line("Converting", &path));
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let mut out_path = out_root.join(relative);
        out_path.set_extension(&config.output_extension);
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let image = decode_image(&path)?;
        encode_image(&out_path, &image, &options)?;
        summary.processed += 1;
    }

    Ok(summary)
}
