pub mod clock;
pub use clock::*;

pub mod logging;
pub use logging::*;

mod rect;
pub use rect::*;

mod vec2;
pub use vec2::*;
