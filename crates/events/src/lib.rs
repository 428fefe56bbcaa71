//! Domain events and the in-memory log they are recorded in.

pub mod event;
pub mod log;

pub use event::Event;
pub use log::{EventLog, Recorded};
