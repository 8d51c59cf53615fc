//! Commit gate combining the name field and the location selection.

use tracing::debug;

use crate::input::NameInput;
use crate::location::LocationPicker;
use crate::store::{Record, RecordStore};

/// Returns true when a record may be committed.
///
/// Requires a non-blank name whose latest check for the current value found it
/// free, with no check pending, and a selected location.
pub fn is_enabled(input: &NameInput, location: &str) -> bool {
	!input.is_blank() && input.is_valid() && !input.is_validating() && !location.is_empty()
}

/// Appends the current entry to `store` and empties the fields.
///
/// Does nothing and returns `None` when the gate is closed.
pub fn commit(input: &mut NameInput, locations: &mut LocationPicker, store: &mut RecordStore) -> Option<Record> {
	if !is_enabled(input, locations.selected()) {
		debug!(name = %input.raw(), status = input.status().label(), location = locations.selected(), "form.commit.rejected");
		return None;
	}

	let record = Record {
		name: input.raw().to_string(),
		location: locations.selected().to_string(),
	};
	store.append(record.clone());
	input.reset();
	locations.reset_selection();
	debug!(name = %record.name, location = %record.location, total = store.len(), "form.commit");
	Some(record)
}
