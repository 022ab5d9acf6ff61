//! Raster decode/encode — pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF) | `image::ImageReader` |
//! | Encode → PNG | `PngEncoder` with a compression tier from [`FormatOptions`] |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → TIFF | `TiffEncoder` (lossless, options ignored) |
//!
//! The output format is always inferred from the destination path's
//! extension. Decoded rasters are normalized to RGB8 or RGBA8 (alpha kept
//! only when the source carries it), so everything downstream can assume
//! three or four channels.

use super::raster::RasterBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, PngEncoder};
use image::codecs::tiff::TiffEncoder;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
    #[error("unsupported output format: {0:?}")]
    UnsupportedFormat(String),
}

/// Encoder settings applied by extension: `compression_level` for lossless
/// formats (PNG, 0–9), `quality_level` for lossy ones (JPEG, 0–100).
/// Values are clamped on construction, mirroring how quality knobs behave
/// everywhere else in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    compression_level: u8,
    quality_level: u8,
}

impl FormatOptions {
    pub fn new(compression_level: u8, quality_level: u8) -> Self {
        Self {
            compression_level: compression_level.min(9),
            quality_level: quality_level.clamp(1, 100),
        }
    }

    pub fn compression_level(self) -> u8 {
        self.compression_level
    }

    pub fn quality_level(self) -> u8 {
        self.quality_level
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            compression_level: 9,
            quality_level: 100,
        }
    }
}

/// Decode an image file into a [`RasterBuffer`] (RGB8 or RGBA8).
pub fn decode_image(path: &Path) -> Result<RasterBuffer, CodecError> {
    let decoded = ImageReader::open(path)
        .map_err(CodecError::Io)?
        .decode()
        .map_err(|e| CodecError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(RasterBuffer::from_dynamic(decoded))
}

/// Encode `raster` to `path`, choosing the format from the path's extension.
pub fn encode_image(
    path: &Path,
    raster: &RasterBuffer,
    options: &FormatOptions,
) -> Result<(), CodecError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let dynamic = raster.to_dynamic().ok_or_else(|| CodecError::Encode {
        path: path.to_path_buf(),
        reason: format!("unsupported channel count {}", raster.channels()),
    })?;

    match ext.as_str() {
        "png" => save_png(&dynamic, path, options.compression_level()),
        "jpg" | "jpeg" => save_jpeg(&dynamic, path, options.quality_level()),
        "tif" | "tiff" => save_tiff(&dynamic, path),
        other => Err(CodecError::UnsupportedFormat(other.to_string())),
    }
}

/// Map the 0–9 PNG compression scale onto the png crate's tiers.
fn compression_tier(level: u8) -> CompressionType {
    match level {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn save_png(img: &DynamicImage, path: &Path, level: u8) -> Result<(), CodecError> {
    let file = File::create(path).map_err(CodecError::Io)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(
        writer,
        compression_tier(level),
        image::codecs::png::FilterType::Adaptive,
    );
    img.write_with_encoder(encoder)
        .map_err(|e| CodecError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn save_jpeg(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), CodecError> {
    let file = File::create(path).map_err(CodecError::Io)?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    // JPEG has no alpha channel; flatten RGBA sources first
    let flattened;
    let img = if img.color().has_alpha() {
        flattened = DynamicImage::ImageRgb8(img.to_rgb8());
        &flattened
    } else {
        img
    };
    img.write_with_encoder(encoder)
        .map_err(|e| CodecError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn save_tiff(img: &DynamicImage, path: &Path) -> Result<(), CodecError> {
    let file = File::create(path).map_err(CodecError::Io)?;
    let writer = BufWriter::new(file);
    let encoder = TiffEncoder::new(writer);
    img.write_with_encoder(encoder)
        .map_err(|e| CodecError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_options_clamp_on_construction() {
        let options = FormatOptions::new(12, 0);
        assert_eq!(options.compression_level(), 9);
        assert_eq!(options.quality_level(), 1);

        let options = FormatOptions::new(5, 250);
        assert_eq!(options.compression_level(), 5);
        assert_eq!(options.quality_level(), 100);
    }

    #[test]
    fn format_options_defaults() {
        let options = FormatOptions::default();
        assert_eq!(options.compression_level(), 9);
        assert_eq!(options.quality_level(), 100);
    }

    #[test]
    fn compression_tiers_cover_full_scale() {
        assert!(matches!(compression_tier(0), CompressionType::Fast));
        assert!(matches!(compression_tier(5), CompressionType::Default));
        assert!(matches!(compression_tier(9), CompressionType::Best));
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let raster = RasterBuffer::from_raw(2, 2, 3, (0..12).collect()).unwrap();

        encode_image(&path, &raster, &FormatOptions::default()).unwrap();
        let decoded = decode_image(&path).unwrap();

        assert_eq!(decoded, raster);
    }

    #[test]
    fn png_round_trip_keeps_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let mut raster = RasterBuffer::filled(3, 3, 4, 100);
        raster.set_sample(1, 1, 3, 7);

        encode_image(&path, &raster, &FormatOptions::default()).unwrap();
        let decoded = decode_image(&path).unwrap();

        assert_eq!(decoded.channels(), 4);
        assert_eq!(decoded.sample(1, 1, 3), 7);
    }

    #[test]
    fn jpeg_encode_flattens_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");
        let raster = RasterBuffer::filled(8, 8, 4, 128);

        encode_image(&path, &raster, &FormatOptions::default()).unwrap();
        let decoded = decode_image(&path).unwrap();

        assert_eq!(decoded.channels(), 3);
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn tiff_round_trip_preserves_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.tiff");
        let raster = RasterBuffer::filled(5, 4, 3, 200);

        encode_image(&path, &raster, &FormatOptions::default()).unwrap();
        let decoded = decode_image(&path).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (5, 4));
        assert_eq!(decoded.sample(2, 2, 1), 200);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.bmp");
        let raster = RasterBuffer::filled(2, 2, 3, 0);

        let result = encode_image(&path, &raster, &FormatOptions::default());
        assert!(matches!(result, Err(CodecError::UnsupportedFormat(e)) if e == "bmp"));
    }

    #[test]
    fn decode_missing_file_is_io_error() {
        let result = decode_image(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[test]
    fn decode_corrupt_file_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("garbage.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        let result = decode_image(&path);
        assert!(matches!(result, Err(CodecError::Decode { .. })));
    }
}
