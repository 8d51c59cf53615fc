//! The form session: owner of all form state and the command surface.
//!
//! Every state transition happens in a `&mut self` method on [`FormSession`].
//! Timers and lookups run on spawned tasks and report back through the
//! session's message channel (see [`crate::msg`]), so there is never a second
//! writer and no locking. Keystrokes mark the name as validating before the
//! debounce timer starts.

use std::sync::Arc;

use enlist_worker::TaskClass;
use tracing::{debug, trace};

use crate::capability::{LocationSource, NameDirectory};
use crate::config::FormConfig;
use crate::debounce::{Debouncer, SettleSink, Settled};
use crate::error::LookupError;
use crate::gate;
use crate::input::NameInput;
use crate::location::{LoadState, LocationPicker};
use crate::mock::MockDirectory;
use crate::msg::{self, Dirty, FormMsg, MsgReceiver, MsgSender};
use crate::store::{Record, RecordStore};
use crate::validation::{CheckComplete, CheckDisposition, CheckSink, ValidationCoordinator};
use crate::view::FormView;

/// One form instance: name field, location picker and committed records.
pub struct FormSession {
	name: NameInput,
	debouncer: Debouncer<String>,
	validation: ValidationCoordinator,
	locations: LocationPicker,
	records: RecordStore,
	msg_tx: MsgSender,
	msg_rx: MsgReceiver,
	closed: bool,
}

impl FormSession {
	/// Creates a session and starts the one-shot location fetch.
	pub fn new(config: &FormConfig, directory: Arc<dyn NameDirectory>, source: Arc<dyn LocationSource>) -> Self {
		let (msg_tx, msg_rx) = msg::channel();

		let settle_tx = msg_tx.clone();
		let settle_sink: SettleSink<String> = Arc::new(move |settled| {
			let _ = settle_tx.send(FormMsg::NameSettled(settled));
		});
		let check_tx = msg_tx.clone();
		let check_sink: CheckSink = Arc::new(move |done| {
			let _ = check_tx.send(FormMsg::NameChecked(done));
		});

		let fetch_tx = msg_tx.clone();
		enlist_worker::spawn(TaskClass::Background, async move {
			let fetch = enlist_worker::spawn(TaskClass::Background, async move { source.fetch_locations().await });
			let result = fetch.await.unwrap_or_else(|error| Err(LookupError::from(error)));
			let _ = fetch_tx.send(FormMsg::LocationsLoaded(result));
		});

		debug!(debounce_ms = config.debounce_ms, supersede = config.supersede_in_flight, "form.session.open");
		Self {
			name: NameInput::new(),
			debouncer: Debouncer::new(config.debounce(), settle_sink),
			validation: ValidationCoordinator::new(directory, check_sink, config.supersede_in_flight),
			locations: LocationPicker::new(),
			records: RecordStore::new(),
			msg_tx,
			msg_rx,
			closed: false,
		}
	}

	/// Creates a session backed by [`MockDirectory`] for both lookups.
	pub fn with_mock(config: &FormConfig) -> Self {
		let mock = Arc::new(MockDirectory::from_config(&config.mock));
		Self::new(config, mock.clone(), mock)
	}

	/// Records a keystroke. The name is marked as validating immediately and
	/// the new value is scheduled for a check once typing pauses.
	pub fn on_raw_value_change(&mut self, value: impl Into<String>) -> Dirty {
		if self.closed {
			return Dirty::NONE;
		}
		let value = value.into();
		trace!(value = %value, "form.name.edit");
		self.name.edit(value.clone());
		self.debouncer.feed(value);
		Dirty::NAME
	}

	/// Selects a location, or clears the selection for an empty string.
	/// Unknown locations are ignored.
	pub fn on_location_change(&mut self, location: &str) -> Dirty {
		if self.closed || !self.locations.select(location) {
			return Dirty::NONE;
		}
		Dirty::LOCATIONS
	}

	/// Commits the current entry if the gate is open.
	pub fn on_commit(&mut self) -> Option<Record> {
		if self.closed {
			return None;
		}
		let record = gate::commit(&mut self.name, &mut self.locations, &mut self.records)?;
		self.debouncer.cancel();
		Some(record)
	}

	/// Removes all committed records.
	pub fn on_clear(&mut self) -> Dirty {
		if self.closed || self.records.is_empty() {
			return Dirty::NONE;
		}
		debug!(cleared = self.records.len(), "form.records.clear");
		self.records.clear();
		Dirty::RECORDS
	}

	/// Tears the session down: the pending debounce emission and all
	/// in-flight checks are cancelled and later messages are ignored.
	pub fn close(&mut self) {
		if self.closed {
			return;
		}
		self.debouncer.cancel();
		self.validation.cancel_all();
		self.closed = true;
		debug!("form.session.close");
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	pub fn is_enabled(&self) -> bool {
		gate::is_enabled(&self.name, self.locations.selected())
	}

	pub fn name(&self) -> &NameInput {
		&self.name
	}

	pub fn locations(&self) -> &LocationPicker {
		&self.locations
	}

	pub fn records(&self) -> &RecordStore {
		&self.records
	}

	pub fn view(&self) -> FormView {
		FormView::build(&self.name, &self.locations, &self.records)
	}

	/// Number of name checks issued and not yet completed or cancelled.
	pub fn checks_in_flight(&self) -> usize {
		self.validation.in_flight()
	}

	/// Returns true while any spawned work is expected to report back.
	pub fn has_pending_work(&self) -> bool {
		!self.closed
			&& (self.debouncer.is_pending() || self.validation.in_flight() > 0 || matches!(self.locations.load_state(), LoadState::Loading))
	}

	/// Returns a sender for injecting messages.
	pub fn msg_tx(&self) -> MsgSender {
		self.msg_tx.clone()
	}

	/// Applies every queued message without waiting.
	pub fn drain_messages(&mut self) -> Dirty {
		let mut dirty = Dirty::NONE;
		while let Ok(msg) = self.msg_rx.try_recv() {
			dirty |= msg.apply(self);
		}
		dirty
	}

	/// Waits for the next message and applies it.
	pub async fn pump(&mut self) -> Dirty {
		match self.msg_rx.recv().await {
			Some(msg) => msg.apply(self),
			None => Dirty::NONE,
		}
	}

	/// Applies messages until no spawned work is outstanding.
	///
	/// Every spawned lookup reports back even when the capability panics, so
	/// this returns once the debounce window and all checks have run out.
	pub async fn pump_until_idle(&mut self) -> Dirty {
		let mut dirty = self.drain_messages();
		while self.has_pending_work() {
			dirty |= self.pump().await;
		}
		dirty
	}

	pub(crate) fn apply_name_settled(&mut self, settled: Settled<String>) -> Dirty {
		if self.closed {
			return Dirty::NONE;
		}
		let Some(value) = self.debouncer.accept(settled) else {
			return Dirty::NONE;
		};
		debug!(value = %value, "form.name.settled");
		// An older check for the same value may have resolved the field while
		// this emission was pending; the fresh check must hold the gate shut.
		let was_validating = self.name.is_validating();
		self.name.mark_validating();
		self.validation.issue(value);
		if was_validating {
			Dirty::NONE
		} else {
			Dirty::NAME
		}
	}

	pub(crate) fn apply_name_checked(&mut self, done: CheckComplete) -> Dirty {
		if self.closed {
			return Dirty::NONE;
		}
		match self.validation.complete(done, &mut self.name) {
			CheckDisposition::Applied(_) => Dirty::NAME,
			CheckDisposition::Stale => Dirty::NONE,
		}
	}

	pub(crate) fn apply_locations_loaded(&mut self, result: Result<Vec<String>, LookupError>) -> Dirty {
		if self.closed || !self.locations.loaded(result) {
			return Dirty::NONE;
		}
		Dirty::LOCATIONS
	}
}

impl Drop for FormSession {
	fn drop(&mut self) {
		self.close();
	}
}

impl std::fmt::Debug for FormSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormSession")
			.field("name", &self.name)
			.field("debouncer", &self.debouncer)
			.field("validation", &self.validation)
			.field("locations", &self.locations)
			.field("records", &self.records.len())
			.field("closed", &self.closed)
			.finish()
	}
}

#[cfg(test)]
mod tests;
