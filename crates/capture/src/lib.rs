//! Capture orchestration: pulls frames, runs the motion detector, drives
//! recordings and annotates the frames handed out for display.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod notify;
pub use notify::*;

mod overlay;
pub use overlay::*;

mod runtime;
pub use runtime::*;

mod service;
pub use service::*;

mod status;
pub use status::*;
