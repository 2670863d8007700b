//! Frame-differencing motion detector with warm-up and cooldown hysteresis.

mod detector;
pub use detector::*;

mod error;
pub use error::*;

mod settings;
pub use settings::*;

mod state;
pub use state::*;
