//! Still-frame PNG snapshots of a DispmanX display.
//!
//! The pipeline is linear and single-shot: open the display, read its
//! mode and transform, capture one frame, run it through the
//! `vc-raster` transform pipeline, and encode the result as a PNG.
//! Each run owns its buffers exclusively and nothing survives the run.

#[cfg(feature = "dispmanx")]
pub mod dispmanx;
pub mod sink;
pub mod source;

pub use source::{DisplayInfo, FrameSource, resolve_dimensions};
