//! Controller-facing abstractions
//!
//! - [`listener`]: notification trait the embedding application implements
//! - [`event`]: broadcast dispatcher that republishes notifications as events
//! - [`clock`]: time source used for polling and acknowledgement deadlines

pub mod clock;
pub mod event;
pub mod listener;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{EventDispatcher, GrblEvent};
pub use listener::GrblListener;
