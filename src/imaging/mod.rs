//! Raster model and pixel operations — pure Rust.
//!
//! | Operation | Module |
//! |---|---|
//! | **Data model** | [`raster`] — `RasterBuffer`, `AlphaMask`, `Offset` |
//! | **Compositing** | [`compose`] — clip + per-pixel alpha blend, centering |
//! | **Resampling** | [`scale`] — thumbnails and proportional overlay sizing |
//! | **Decode / encode** | [`codec`] — `image` crate I/O, format by extension |
//!
//! [`compose`] and [`scale`] are pure over in-memory buffers and unit
//! testable without touching the filesystem; [`codec`] is the only module
//! that does I/O.

pub mod codec;
pub mod compose;
pub mod raster;
pub mod scale;

pub use codec::{CodecError, FormatOptions, decode_image, encode_image};
pub use compose::{ComposeError, blend, center_offset};
pub use raster::{AlphaMask, Offset, RasterBuffer};
pub use scale::{ScaleError, resize, scale_overlay};
