//! In-memory raster data model.
//!
//! [`RasterBuffer`] is a dense row-major grid of 8-bit samples with a channel
//! count (RGB = 3, RGBA = 4, as produced by [`codec`](super::codec)).
//! [`AlphaMask`] is a channel-less grid of `f32` coverage values in `[0, 1]`
//! that drives blending in [`compose`](super::compose). [`Offset`] positions
//! an overlay in a base image's coordinate space and may be negative or
//! beyond the base's bounds.
//!
//! These types carry data only; all behavior lives in the sibling modules.

use image::DynamicImage;

/// A dense H×W×C grid of unsigned 8-bit samples, row-major.
///
/// Invariant: `data.len() == width * height * channels`, enforced by every
/// constructor. Sample access is always in-bounds for
/// `row < height`, `col < width`, `channel < channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Build a raster from raw samples. Returns `None` if the sample count
    /// does not match `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A raster with every sample set to `value`.
    pub fn filled(width: u32, height: u32, channels: u8, value: u8) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            data: vec![value; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, row: u32, col: u32, channel: u8) -> usize {
        (row as usize * self.width as usize + col as usize) * self.channels as usize
            + channel as usize
    }

    /// Read one sample. Panics if the coordinates are out of bounds.
    #[inline]
    pub fn sample(&self, row: u32, col: u32, channel: u8) -> u8 {
        self.data[self.index(row, col, channel)]
    }

    /// Write one sample. Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_sample(&mut self, row: u32, col: u32, channel: u8, value: u8) {
        let idx = self.index(row, col, channel);
        self.data[idx] = value;
    }

    /// Convert a decoded image into a raster. Alpha-carrying sources keep
    /// their alpha channel (C = 4); everything else is flattened to RGB (C = 3).
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (data, channels): (Vec<u8>, u8) = match image {
            DynamicImage::ImageRgb8(img) => (img.into_raw(), 3),
            DynamicImage::ImageRgba8(img) => (img.into_raw(), 4),
            other if other.color().has_alpha() => (other.to_rgba8().into_raw(), 4),
            other => (other.to_rgb8().into_raw(), 3),
        };
        // Buffer length is guaranteed by the image crate's own invariants.
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Bridge back into the `image` crate for resampling and encoding.
    /// Returns `None` for channel counts the `image` crate cannot represent.
    pub(crate) fn to_dynamic(&self) -> Option<DynamicImage> {
        match self.channels {
            3 => image::RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgb8),
            4 => image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgba8),
            _ => None,
        }
    }
}

/// Per-pixel coverage values in `[0, 1]` for one overlay.
///
/// Dimensions must equal the associated overlay's exactly; there is no
/// implicit resizing. Values outside `[0, 1]` are not rejected here — they
/// pass straight through the blend formula (caller precondition).
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl AlphaMask {
    /// Build a mask from raw coverage values. Returns `None` if the value
    /// count does not match `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// A fully opaque mask (coverage 1.0 everywhere).
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![1.0; width as usize * height as usize],
        }
    }

    /// Build a mask from one channel of a raster, scaling samples to `[0, 1]`
    /// by dividing by 255. This is how an overlay's 4th channel becomes its
    /// alpha mask. Returns `None` if the raster has no such channel.
    pub fn from_channel(raster: &RasterBuffer, channel: u8) -> Option<Self> {
        if channel >= raster.channels() {
            return None;
        }
        let mut data = Vec::with_capacity(raster.width() as usize * raster.height() as usize);
        for row in 0..raster.height() {
            for col in 0..raster.width() {
                data.push(raster.sample(row, col, channel) as f32 / 255.0);
            }
        }
        Some(Self {
            width: raster.width(),
            height: raster.height(),
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one coverage value. Panics if the coordinates are out of bounds.
    #[inline]
    pub fn value(&self, row: u32, col: u32) -> f32 {
        self.data[row as usize * self.width as usize + col as usize]
    }
}

/// An overlay's top-left corner in the base image's coordinate space.
///
/// Both components are signed: the overlay may start above/left of the base
/// (negative) or entirely past its far edge. The compositor clips either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}
