//! Plain-text rendering of a [`FormView`].

use std::fmt::Write;

use enlist_form::{FormView, Indicator};

fn marker(indicator: Indicator) -> &'static str {
	match indicator {
		Indicator::Blank => "",
		Indicator::Fetching => " [checking]",
		Indicator::Valid => " [ok]",
		Indicator::Error => " [x]",
		Indicator::Unknown => " [?]",
	}
}

/// Renders the form as a block of text terminated by a newline.
pub fn render(view: &FormView) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "name:     {:?}{}", view.raw_value, marker(view.name_indicator));
	if let Some(error) = view.name_error {
		let _ = writeln!(out, "          {error}");
	}

	let selected = if view.selected_location.is_empty() {
		"--Please select a location--"
	} else {
		view.selected_location.as_str()
	};
	let _ = writeln!(out, "location: {selected}{}", marker(view.location_indicator));
	if !view.locations.is_empty() {
		let _ = writeln!(out, "          options: {}", view.locations.join(", "));
	}

	let _ = write!(out, "add:      {}", if view.can_add { "enabled" } else { "disabled" });
	if view.can_clear {
		out.push_str("    clear: available");
	}
	out.push('\n');

	if !view.records.is_empty() {
		let _ = writeln!(out, "records:");
		for (idx, record) in view.records.iter().enumerate() {
			let _ = writeln!(out, "  {}. {} | {}", idx + 1, record.name, record.location);
		}
	}
	out
}
