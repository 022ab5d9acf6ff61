//! Batch configuration.
//!
//! All knobs that used to be scattered constants — output extension,
//! compression/quality levels, thumbnail shape, overlay divider — live in
//! one explicit [`BatchConfig`] passed to the batch driver. A run uses stock
//! defaults unless the target directory contains a `rastermark.toml`, which
//! may override any subset of fields:
//!
//! ```toml
//! # All options are optional — defaults shown below
//! extensions = ["jpg", "png", "tiff"]  # extension allow-list for discovery
//! output_extension = "png"             # convert mode target format
//! png_compression = 9                  # 0-9, lossless formats
//! jpeg_quality = 100                   # 0-100, lossy formats
//! thumb_height = 256                   # requested thumbnail shape
//! thumb_width = 256
//! keep_aspect_ratio = true             # thumbnail aspect handling
//! overlay_divider = 5.0                # overlay width = image width / divider
//! ```

use crate::imaging::FormatOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-directory config file name.
pub const CONFIG_FILE: &str = "rastermark.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Extension allow-list used by file discovery.
    pub extensions: Vec<String>,
    /// Target extension for convert runs.
    pub output_extension: String,
    /// PNG compression level, 0–9.
    pub png_compression: u8,
    /// JPEG quality, 0–100.
    pub jpeg_quality: u8,
    /// Requested thumbnail shape (height, width as separate fields).
    pub thumb_height: u32,
    pub thumb_width: u32,
    /// Whether thumbnails recompute their height from the source aspect ratio.
    pub keep_aspect_ratio: bool,
    /// Overlay width = base width / divider.
    pub overlay_divider: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: crate::scan::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            output_extension: "png".to_string(),
            png_compression: 9,
            jpeg_quality: 100,
            thumb_height: 256,
            thumb_width: 256,
            keep_aspect_ratio: true,
            overlay_divider: 5.0,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid("extensions must not be empty".into()));
        }
        if self.output_extension.is_empty() {
            return Err(ConfigError::Invalid(
                "output_extension must not be empty".into(),
            ));
        }
        if self.png_compression > 9 {
            return Err(ConfigError::Invalid(format!(
                "png_compression must be 0-9, got {}",
                self.png_compression
            )));
        }
        if self.jpeg_quality > 100 {
            return Err(ConfigError::Invalid(format!(
                "jpeg_quality must be 0-100, got {}",
                self.jpeg_quality
            )));
        }
        if self.thumb_height == 0 || self.thumb_width == 0 {
            return Err(ConfigError::Invalid(format!(
                "thumbnail shape {}x{} has a zero dimension",
                self.thumb_height, self.thumb_width
            )));
        }
        if self.overlay_divider <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "overlay_divider must be positive, got {}",
                self.overlay_divider
            )));
        }
        Ok(())
    }

    /// Encoder options derived from the configured levels.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions::new(self.png_compression, self.jpeg_quality)
    }

    /// Thumbnail target shape as (height, width).
    pub fn thumb_shape(&self) -> (u32, u32) {
        (self.thumb_height, self.thumb_width)
    }
}

/// Load `rastermark.toml` from `dir`, falling back to stock defaults when
/// the file does not exist.
pub fn load_config(dir: &Path) -> Result<BatchConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(BatchConfig::default());
    }
    let content = std::fs::read_to_string(&path)?;
    let config: BatchConfig =
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
    config.validate()?;
    Ok(config)
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Fallback target directory when the CLI argument is omitted.
pub fn default_image_dir() -> PathBuf {
    home_dir().join("Desktop").join("images")
}

/// Fallback overlay image when the CLI argument is omitted.
pub fn default_logo_path() -> PathBuf {
    home_dir().join("Desktop").join("logo.png")
}
