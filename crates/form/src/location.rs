//! Fetched location list and the current selection.

use tracing::{debug, warn};

use crate::error::LookupError;

/// Progress of the one-shot location fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
	#[default]
	Loading,
	Ready,
	Failed(LookupError),
}

/// Selectable locations plus the selected one. An empty selection means none.
#[derive(Debug, Clone, Default)]
pub struct LocationPicker {
	options: Vec<String>,
	selected: String,
	load: LoadState,
}

impl LocationPicker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn options(&self) -> &[String] {
		&self.options
	}

	pub fn selected(&self) -> &str {
		&self.selected
	}

	pub fn load_state(&self) -> &LoadState {
		&self.load
	}

	pub fn has_selection(&self) -> bool {
		!self.selected.is_empty()
	}

	/// Stores the fetch result. Only the first result is kept.
	pub fn loaded(&mut self, result: Result<Vec<String>, LookupError>) -> bool {
		if self.load != LoadState::Loading {
			debug!("form.locations.duplicate_load");
			return false;
		}
		match result {
			Ok(options) => {
				debug!(count = options.len(), "form.locations.loaded");
				self.options = options;
				self.load = LoadState::Ready;
			}
			Err(error) => {
				warn!(%error, "form.locations.failed");
				self.load = LoadState::Failed(error);
			}
		}
		true
	}

	/// Selects `location`, or clears the selection for an empty string.
	///
	/// Returns false and leaves the selection unchanged if `location` is not
	/// one of the loaded options.
	pub fn select(&mut self, location: &str) -> bool {
		if location.is_empty() {
			self.selected.clear();
			return true;
		}
		if !self.options.iter().any(|option| option == location) {
			debug!(location, "form.locations.unknown");
			return false;
		}
		self.selected = location.to_string();
		true
	}

	pub fn reset_selection(&mut self) {
		self.selected.clear();
	}
}
