pub mod evaluate;
pub mod generator;
pub mod question;

pub use evaluate::*;
pub use generator::*;
pub use question::*;
