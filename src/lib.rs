//! # rastermark
//!
//! Batch raster processing: format conversion, aspect-preserving
//! thumbnails, and centered logo overlays across a directory tree.
//!
//! # Architecture
//!
//! The crate splits pure pixel math from I/O. Everything under
//! [`imaging`] except the codec operates on in-memory buffers and is unit
//! testable without touching the filesystem; [`process`] wires discovery,
//! decode, transform, and encode into the three batch modes the CLI exposes.
//!
//! ```text
//! scan      directory tree  →  image paths      (extension allow-list)
//! imaging   pixels in       →  pixels out       (compose, scale, codec)
//! process   paths + config  →  rewritten files  (overlay | thumbs | convert)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Raster model and pixel operations: compositing, resampling, decode/encode |
//! | [`scan`] | Recursive image discovery by extension allow-list |
//! | [`process`] | Batch driver — overlay, thumbnail, and convert runs |
//! | [`config`] | `BatchConfig` defaults and optional `rastermark.toml` loading |
//! | [`output`] | CLI progress and summary formatting |
//!
//! # Design Decisions
//!
//! ## Explicit clipping, never implicit wraparound
//!
//! The compositor ([`imaging::compose`]) computes the valid index ranges of
//! both rectangles up front with `max(0, …)` / `min(…)` clamping and bails
//! out before any pixel access when they are empty. An overlay placed
//! partially or entirely off-canvas — negative offsets included — is a
//! normal input, not an error.
//!
//! ## In-place batches
//!
//! Overlay and thumbnail runs rewrite each source file in its own format;
//! convert runs are the only mode that writes elsewhere (a sibling
//! `output_<ext>` tree). Each file is decoded, transformed, and persisted
//! independently, so one file's failure cannot corrupt another's output.
//!
//! ## Pure-Rust imaging
//!
//! All decoding, resampling, and encoding goes through the `image` crate —
//! no ImageMagick, no system libraries. The binary is self-contained.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;
