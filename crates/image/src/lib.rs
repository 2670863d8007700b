//! Raster images for the capture pipeline.
//!
//! `Image` is a plain pixel buffer tagged with its `PixelFormat`. Capture
//! buffers (YUYV, MJPEG) are converted to RGB8, motion analysis runs on
//! Gray8, and overlays are drawn straight into RGB8 pixels.

mod draw;
pub use draw::*;

mod error;
pub use error::*;

mod filter;
pub use filter::*;

mod font;

mod image;
pub use image::*;

mod jpeg;
pub use jpeg::*;

mod morph;
pub use morph::*;

mod pixelformat;
pub use pixelformat::*;

mod region;
pub use region::*;

mod rgb;
pub use rgb::*;
