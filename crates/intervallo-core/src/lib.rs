pub mod app;
pub mod ipc;
pub mod sequencer;
pub mod timers;
pub mod timing;

pub use app::*;
pub use ipc::*;
pub use sequencer::*;
pub use timers::*;
pub use timing::*;
