//! Read-only snapshot of the form for a presentation layer.

use crate::gate;
use crate::input::{NameInput, NameStatus};
use crate::location::{LoadState, LocationPicker};
use crate::store::{Record, RecordStore};

/// Message shown under a name reported as taken.
pub const NAME_TAKEN_MESSAGE: &str = "this name has already been taken";

/// Message shown under a name whose check failed.
pub const NAME_UNKNOWN_MESSAGE: &str = "could not check this name";

/// Status marker displayed next to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
	Blank,
	/// Waiting on a lookup.
	Fetching,
	Valid,
	Error,
	/// The lookup failed; validity is not known.
	Unknown,
}

/// Everything a presentation layer needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
	pub raw_value: String,
	pub is_validating: bool,
	pub is_valid: bool,
	pub name_indicator: Indicator,
	pub name_error: Option<&'static str>,
	pub locations: Vec<String>,
	pub selected_location: String,
	pub location_indicator: Indicator,
	/// The add control is enabled.
	pub can_add: bool,
	/// The clear control is offered (there is something to clear).
	pub can_clear: bool,
	pub records: Vec<Record>,
}

impl FormView {
	pub fn build(input: &NameInput, locations: &LocationPicker, records: &RecordStore) -> Self {
		Self {
			raw_value: input.raw().to_string(),
			is_validating: input.is_validating(),
			is_valid: input.is_valid(),
			name_indicator: name_indicator(input),
			name_error: name_error(input),
			locations: locations.options().to_vec(),
			selected_location: locations.selected().to_string(),
			location_indicator: location_indicator(locations),
			can_add: gate::is_enabled(input, locations.selected()),
			can_clear: !records.is_empty(),
			records: records.list().to_vec(),
		}
	}
}

fn name_indicator(input: &NameInput) -> Indicator {
	if input.is_validating() {
		return Indicator::Fetching;
	}
	if input.is_blank() {
		return Indicator::Blank;
	}
	match input.status() {
		NameStatus::Taken => Indicator::Error,
		NameStatus::Unknown => Indicator::Unknown,
		NameStatus::Available => Indicator::Valid,
		NameStatus::Idle | NameStatus::Validating => Indicator::Blank,
	}
}

fn name_error(input: &NameInput) -> Option<&'static str> {
	if input.is_validating() || input.is_blank() {
		return None;
	}
	match input.status() {
		NameStatus::Taken => Some(NAME_TAKEN_MESSAGE),
		NameStatus::Unknown => Some(NAME_UNKNOWN_MESSAGE),
		_ => None,
	}
}

fn location_indicator(locations: &LocationPicker) -> Indicator {
	match locations.load_state() {
		LoadState::Loading => Indicator::Fetching,
		LoadState::Failed(_) => Indicator::Error,
		LoadState::Ready if locations.options().is_empty() => Indicator::Fetching,
		LoadState::Ready if locations.has_selection() => Indicator::Valid,
		LoadState::Ready => Indicator::Blank,
	}
}
