//! Frame acquisition for the capture pipeline.
//!
//! Every backend implements `FrameSource`, a blocking pull interface meant to
//! be driven from a single capture thread. `FallbackSource` tries a list of
//! candidate sources in order and is what `open_default` hands out.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod fallback;
pub use fallback::*;

mod source;
pub use source::*;

mod videoframe;
pub use videoframe::*;

#[cfg(feature = "v4l2")]
pub mod v4l2;
