//! Worker primitives for the form core.
//!
//! Timers and capability calls run as tokio tasks spawned through this crate so
//! they are tagged with a [`TaskClass`] in traces. Spawned work reports back to
//! its owner through message channels; ownership of state never leaves the
//! owner's execution context.

mod class;
mod spawn;
mod token;

pub use class::TaskClass;
pub use spawn::spawn;
pub use token::{GenerationClock, GenerationToken};
