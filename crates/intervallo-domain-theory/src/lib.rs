pub mod intervals;
pub mod keyboard;
pub mod pitch;

pub use intervals::*;
pub use keyboard::*;
pub use pitch::*;
