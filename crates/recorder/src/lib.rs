//! Motion clip recording: one file per session, written at a fixed rate
//! through the first encoder of a fallback chain that opens.

mod avi;
pub use avi::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod ffmpeg;
pub use ffmpeg::*;

mod naming;
pub use naming::*;

mod session;
pub use session::*;

mod stamp;
pub use stamp::*;

mod writer;
pub use writer::*;
