//! Name check coordination.
//!
//! [`ValidationCoordinator`] issues one capability call per settled value and
//! decides, when a call completes, whether its outcome may touch the name
//! field. A completion is authoritative only if the value it was issued for
//! equals the field's raw value at completion time; anything else is stale and
//! dropped without mutating state. Calls are never serialized, so several may
//! be in flight and complete in any order.
//!
//! # Supersession
//!
//! With `supersede_in_flight` enabled, issuing a check cancels all older
//! in-flight checks. Cancelled calls report nothing. This only saves work:
//! staleness is still decided by value comparison, so observable state is the
//! same with or without supersession.

use std::sync::Arc;

use enlist_worker::{GenerationClock, GenerationToken, TaskClass};
use tracing::{debug, trace, warn};

use crate::capability::NameDirectory;
use crate::error::LookupError;
use crate::input::{NameInput, NameStatus};

/// Completion of one name check, delivered back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckComplete {
	/// Request id assigned by [`ValidationCoordinator::issue`].
	pub request: u64,
	/// The exact value the check was issued for.
	pub for_value: String,
	/// `Ok(true)` if the name is taken.
	pub outcome: Result<bool, LookupError>,
}

/// Callback receiving check completions. Runs on the check task.
pub type CheckSink = Arc<dyn Fn(CheckComplete) + Send + Sync>;

/// What happened to a completion passed to [`ValidationCoordinator::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckDisposition {
	/// The outcome was stored on the field.
	Applied(NameStatus),
	/// The field no longer holds the checked value.
	Stale,
}

#[derive(Debug)]
struct InFlightCheck {
	token: GenerationToken,
	for_value: String,
}

/// Issues name checks and arbitrates their completions.
pub struct ValidationCoordinator {
	directory: Arc<dyn NameDirectory>,
	sink: CheckSink,
	supersede: bool,
	requests: GenerationClock,
	in_flight: Vec<InFlightCheck>,
}

impl ValidationCoordinator {
	pub fn new(directory: Arc<dyn NameDirectory>, sink: CheckSink, supersede: bool) -> Self {
		Self {
			directory,
			sink,
			supersede,
			requests: GenerationClock::new(),
			in_flight: Vec::new(),
		}
	}

	/// Starts a check for `value` and returns its request id.
	pub fn issue(&mut self, value: String) -> u64 {
		if self.supersede {
			self.cancel_all();
		}

		let request = self.requests.next();
		let token = GenerationToken::new(request);
		self.in_flight.push(InFlightCheck {
			token: token.clone(),
			for_value: value.clone(),
		});
		debug!(request, value = %value, in_flight = self.in_flight.len(), "form.check.issue");

		let directory = Arc::clone(&self.directory);
		let sink = Arc::clone(&self.sink);
		let lookup_value = value.clone();
		enlist_worker::spawn(TaskClass::Background, async move {
			// The lookup runs on its own task so a panicking directory still
			// produces a completion and the in-flight entry is released.
			let mut call = enlist_worker::spawn(TaskClass::Background, async move { directory.is_name_taken(&lookup_value).await });
			let outcome = tokio::select! {
				_ = token.cancelled() => {
					call.abort();
					return;
				}
				joined = &mut call => joined.unwrap_or_else(|error| Err(LookupError::from(error))),
			};
			sink(CheckComplete {
				request,
				for_value: value,
				outcome,
			});
		});
		request
	}

	/// Applies a completion to `input` unless it is stale.
	pub fn complete(&mut self, done: CheckComplete, input: &mut NameInput) -> CheckDisposition {
		self.in_flight.retain(|check| check.token.generation() != done.request);

		if done.for_value != input.raw() {
			trace!(request = done.request, value = %done.for_value, current = %input.raw(), "form.check.stale");
			return CheckDisposition::Stale;
		}

		let status = match done.outcome {
			Ok(true) => NameStatus::Taken,
			Ok(false) => NameStatus::Available,
			Err(error) => {
				warn!(request = done.request, value = %done.for_value, %error, "form.check.failed");
				NameStatus::Unknown
			}
		};
		debug!(request = done.request, value = %done.for_value, status = status.label(), "form.check.applied");
		input.resolve(status);
		CheckDisposition::Applied(status)
	}

	/// Cancels every in-flight check. Cancelled checks never report back.
	pub fn cancel_all(&mut self) {
		for check in self.in_flight.drain(..) {
			trace!(request = check.token.generation(), value = %check.for_value, "form.check.cancel");
			check.token.cancel();
		}
	}

	/// Number of issued checks that have neither completed nor been cancelled.
	pub fn in_flight(&self) -> usize {
		self.in_flight.len()
	}

	/// Values of the in-flight checks, oldest first.
	pub fn in_flight_values(&self) -> impl Iterator<Item = &str> {
		self.in_flight.iter().map(|check| check.for_value.as_str())
	}
}

impl std::fmt::Debug for ValidationCoordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ValidationCoordinator")
			.field("supersede", &self.supersede)
			.field("last_request", &self.requests.current())
			.field("in_flight", &self.in_flight)
			.finish()
	}
}
