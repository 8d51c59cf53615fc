//! External lookup capabilities consumed by the form.
//!
//! Implementations may take arbitrarily long and complete in any order. The
//! session never awaits them directly; calls run on spawned tasks whose
//! results are delivered back as messages.

use async_trait::async_trait;

use crate::error::LookupError;

/// Answers whether a name is already in use.
#[async_trait]
pub trait NameDirectory: Send + Sync + 'static {
	/// Returns `Ok(true)` if `name` is already taken.
	async fn is_name_taken(&self, name: &str) -> Result<bool, LookupError>;
}

/// Supplies the selectable locations. Called once per session.
#[async_trait]
pub trait LocationSource: Send + Sync + 'static {
	async fn fetch_locations(&self) -> Result<Vec<String>, LookupError>;
}
