//! Geometric resampling.
//!
//! Two entry points: [`resize`] for the thumbnail path and [`scale_overlay`]
//! for sizing a logo relative to the image it will be composited onto. Both
//! resample through the `image` crate with a single consistent filter
//! (Catmull-Rom, a cubic kernel) and preserve the source's channel count, so
//! a scaled RGBA overlay keeps its alpha channel for mask extraction.

use super::raster::RasterBuffer;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaleError {
    #[error("target shape {height}x{width} has a non-positive dimension")]
    InvalidShape { height: u32, width: u32 },
    #[error("cannot resample a raster with {0} channels")]
    UnsupportedChannels(u8),
}

/// Resize `image` to `target_shape = (height, width)`.
///
/// With `keep_aspect_ratio` false this is a plain resample to the exact
/// target. With it true, the output height is recomputed from the source's
/// width/height ratio applied to the target *width* (truncating cast), and
/// the target width is reused as-is; the height coordinate of the requested
/// shape is ignored. This axis mixing is long-standing thumbnail behavior —
/// it only matches the conventional aspect-preserving formula for square
/// targets, and downstream callers depend on it as-is.
pub fn resize(
    image: &RasterBuffer,
    target_shape: (u32, u32),
    keep_aspect_ratio: bool,
) -> Result<RasterBuffer, ScaleError> {
    let (target_h, target_w) = target_shape;
    if target_h == 0 || target_w == 0 {
        return Err(ScaleError::InvalidShape {
            height: target_h,
            width: target_w,
        });
    }

    let (out_w, out_h) = if keep_aspect_ratio {
        let ratio = image.width() as f64 / image.height() as f64;
        (target_w, (target_w as f64 * ratio) as u32)
    } else {
        (target_w, target_h)
    };
    if out_w == 0 || out_h == 0 {
        return Err(ScaleError::InvalidShape {
            height: out_h,
            width: out_w,
        });
    }

    resample(image, out_w, out_h)
}

/// Scale `overlay` so its width is `base.width() / divider`, keeping the
/// overlay's own aspect ratio (height scales by the same factor). Used to
/// size a logo proportionally to the image it will be placed on; the
/// conventional divider is 5.
pub fn scale_overlay(
    overlay: &RasterBuffer,
    base: &RasterBuffer,
    divider: f64,
) -> Result<RasterBuffer, ScaleError> {
    let new_w = base.width() as f64 / divider;
    let factor = new_w / overlay.width() as f64;
    let new_h = overlay.height() as f64 * factor;

    let (out_w, out_h) = (new_w as u32, new_h as u32);
    if out_w == 0 || out_h == 0 {
        return Err(ScaleError::InvalidShape {
            height: out_h,
            width: out_w,
        });
    }

    resample(overlay, out_w, out_h)
}

fn resample(image: &RasterBuffer, width: u32, height: u32) -> Result<RasterBuffer, ScaleError> {
    let dynamic = image
        .to_dynamic()
        .ok_or(ScaleError::UnsupportedChannels(image.channels()))?;
    let resized = dynamic.resize_exact(width, height, FilterType::CatmullRom);
    Ok(RasterBuffer::from_dynamic(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_exact_shape_without_aspect() {
        let image = RasterBuffer::filled(80, 40, 3, 128);
        let out = resize(&image, (20, 60), false).unwrap();

        assert_eq!((out.width(), out.height()), (60, 20));
        assert_eq!(out.channels(), 3);
    }

    #[test]
    fn resize_keep_aspect_uses_width_times_source_ratio() {
        // Source 200x100 → ratio 2.0; target (50, 80) → output 80 wide,
        // height = 80 * 2.0 = 160. The requested height is ignored.
        let image = RasterBuffer::filled(200, 100, 3, 0);
        let out = resize(&image, (50, 80), true).unwrap();

        assert_eq!((out.width(), out.height()), (80, 160));
    }

    #[test]
    fn resize_keep_aspect_square_target() {
        // 400x200 source, (256, 256) target → 256 x 512
        let image = RasterBuffer::filled(400, 200, 3, 0);
        let out = resize(&image, (256, 256), true).unwrap();

        assert_eq!((out.width(), out.height()), (256, 512));
    }

    #[test]
    fn resize_keep_aspect_truncates_height() {
        // ratio = 3/2 = 1.5; 33 * 1.5 = 49.5 → 49
        let image = RasterBuffer::filled(3, 2, 3, 0);
        let out = resize(&image, (10, 33), true).unwrap();

        assert_eq!((out.width(), out.height()), (33, 49));
    }

    #[test]
    fn resize_zero_dimension_is_invalid_shape() {
        let image = RasterBuffer::filled(10, 10, 3, 0);

        assert!(matches!(
            resize(&image, (0, 50), false),
            Err(ScaleError::InvalidShape { .. })
        ));
        assert!(matches!(
            resize(&image, (50, 0), true),
            Err(ScaleError::InvalidShape { .. })
        ));
    }

    #[test]
    fn resize_preserves_alpha_channel() {
        let image = RasterBuffer::filled(16, 16, 4, 200);
        let out = resize(&image, (8, 8), false).unwrap();

        assert_eq!(out.channels(), 4);
    }

    #[test]
    fn scale_overlay_divides_base_width() {
        // base 500 wide, divider 5 → overlay width 100; 50x20 logo scales
        // by factor 2 → 100x40
        let base = RasterBuffer::filled(500, 300, 3, 0);
        let overlay = RasterBuffer::filled(50, 20, 3, 0);

        let out = scale_overlay(&overlay, &base, 5.0).unwrap();
        assert_eq!((out.width(), out.height()), (100, 40));
    }

    #[test]
    fn scale_overlay_truncates_fractional_sizes() {
        // base 102 / 5 = 20.4 → width 20; factor 20.4/8 = 2.55; 6 * 2.55 = 15.3 → 15
        let base = RasterBuffer::filled(102, 100, 3, 0);
        let overlay = RasterBuffer::filled(8, 6, 3, 0);

        let out = scale_overlay(&overlay, &base, 5.0).unwrap();
        assert_eq!((out.width(), out.height()), (20, 15));
    }

    #[test]
    fn scale_overlay_degenerate_result_is_invalid_shape() {
        let base = RasterBuffer::filled(3, 3, 3, 0);
        let overlay = RasterBuffer::filled(10, 10, 3, 0);

        // 3 / 5 = 0.6 → zero-width overlay
        assert!(matches!(
            scale_overlay(&overlay, &base, 5.0),
            Err(ScaleError::InvalidShape { .. })
        ));
    }

    #[test]
    fn scale_overlay_keeps_alpha_channel() {
        let base = RasterBuffer::filled(100, 100, 3, 0);
        let overlay = RasterBuffer::filled(10, 10, 4, 255);

        let out = scale_overlay(&overlay, &base, 5.0).unwrap();
        assert_eq!(out.channels(), 4);
        assert_eq!((out.width(), out.height()), (20, 20));
    }
}
