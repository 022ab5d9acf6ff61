//! Alpha compositing and overlay placement.
//!
//! [`blend`] is the heart of the crate: it clips an overlay rectangle against
//! a base rectangle at an arbitrary signed offset, then blends the clipped
//! region per pixel through an [`AlphaMask`]. The clip ranges are computed
//! explicitly with `max(0, …)` / `min(…)` so a placement that is partially or
//! fully off-canvas never touches memory it shouldn't — no reliance on
//! negative-index conventions.
//!
//! All functions here are pure over in-memory buffers and perform no I/O.

use super::raster::{AlphaMask, Offset, RasterBuffer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("alpha mask is {mask_width}x{mask_height} but overlay is {overlay_width}x{overlay_height}")]
    DimensionMismatch {
        mask_width: u32,
        mask_height: u32,
        overlay_width: u32,
        overlay_height: u32,
    },
}

/// Blend `overlay` into `base` at `offset`, weighting each pixel by `mask`.
///
/// Only the first three channels of both rasters participate; an overlay's
/// 4th channel is ignored here (it is the conventional *source* of the mask,
/// see [`AlphaMask::from_channel`]). For every pixel in the overlapping
/// region, each channel becomes `mask * overlay + (1 - mask) * base`,
/// computed in `f32` and truncated back to `u8` on store.
///
/// Placements with no overlap — fully off-canvas offsets, zero-sized
/// rasters — are a valid no-op, not an error. The mask's dimensions must
/// equal the overlay's exactly; this is checked before any pixel access.
///
/// Preconditions: both rasters carry at least three channels (the codec
/// only produces RGB8/RGBA8), and mask values lie in `[0, 1]`. Out-of-range
/// coverage is passed through the formula unvalidated.
pub fn blend(
    base: &mut RasterBuffer,
    overlay: &RasterBuffer,
    offset: Offset,
    mask: &AlphaMask,
) -> Result<(), ComposeError> {
    if mask.width() != overlay.width() || mask.height() != overlay.height() {
        return Err(ComposeError::DimensionMismatch {
            mask_width: mask.width(),
            mask_height: mask.height(),
            overlay_width: overlay.width(),
            overlay_height: overlay.height(),
        });
    }

    debug_assert!(base.channels() >= 3 && overlay.channels() >= 3);

    let (base_w, base_h) = (base.width() as i64, base.height() as i64);
    let (over_w, over_h) = (overlay.width() as i64, overlay.height() as i64);

    // Clipped rectangle in base coordinates
    let y1 = offset.y.max(0);
    let y2 = (offset.y + over_h).min(base_h);
    let x1 = offset.x.max(0);
    let x2 = (offset.x + over_w).min(base_w);

    // The same rectangle mapped into overlay-local coordinates
    let oy1 = (-offset.y).max(0);
    let oy2 = (base_h - offset.y).min(over_h);
    let ox1 = (-offset.x).max(0);
    let ox2 = (base_w - offset.x).min(over_w);

    // No overlap: nothing to do, and nothing may be indexed
    if y1 >= y2 || x1 >= x2 || oy1 >= oy2 || ox1 >= ox2 {
        return Ok(());
    }

    for row in y1..y2 {
        let over_row = (row - offset.y) as u32;
        for col in x1..x2 {
            let over_col = (col - offset.x) as u32;
            let alpha = mask.value(over_row, over_col);
            for channel in 0..3 {
                let over = overlay.sample(over_row, over_col, channel) as f32;
                let under = base.sample(row as u32, col as u32, channel) as f32;
                let blended = alpha * over + (1.0 - alpha) * under;
                base.set_sample(row as u32, col as u32, channel, blended as u8);
            }
        }
    }

    Ok(())
}

/// The offset that centers `overlay` over `base`.
///
/// Each axis is `base_extent / 2 - overlay_extent / 2` with both halves
/// truncated independently, so the result follows integer-division
/// semantics rather than a rounded midpoint. Negative when the overlay is
/// larger than the base.
pub fn center_offset(base: &RasterBuffer, overlay: &RasterBuffer) -> Offset {
    Offset {
        x: base.width() as i64 / 2 - overlay.width() as i64 / 2,
        y: base.height() as i64 / 2 - overlay.height() as i64 / 2,
    }
}
