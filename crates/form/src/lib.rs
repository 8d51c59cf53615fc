//! Form core for entering a name, checking it against a remote directory,
//! picking a location and committing the pair to an in-memory table.
//!
//! # Flow
//!
//! ```text
//! keystroke ─► NameInput (validating) ─► Debouncer ─► settled value
//!     ─► ValidationCoordinator ─► NameDirectory::is_name_taken (spawned)
//!     ─► completion, applied only if the field still holds that value
//!     ─► gate (name valid + location selected) ─► RecordStore
//! ```
//!
//! [`FormSession`] owns all state and exposes the command surface
//! (`on_raw_value_change`, `on_location_change`, `on_commit`, `on_clear`) and
//! a [`FormView`] snapshot for rendering.

pub mod capability;
pub mod config;
pub mod debounce;
pub mod error;
pub mod gate;
pub mod input;
pub mod location;
pub mod mock;
pub mod msg;
pub mod session;
pub mod store;
#[cfg(test)]
mod testing;
pub mod validation;
pub mod view;

pub use capability::{LocationSource, NameDirectory};
pub use config::FormConfig;
pub use error::{ConfigError, LookupError};
pub use input::{NameInput, NameStatus};
pub use location::{LoadState, LocationPicker};
pub use mock::MockDirectory;
pub use msg::{Dirty, FormMsg};
pub use session::FormSession;
pub use store::{Record, RecordStore};
pub use view::{FormView, Indicator};
