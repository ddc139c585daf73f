pub mod audio;
pub mod settings;

pub use audio::*;
pub use settings::*;
