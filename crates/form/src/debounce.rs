//! Trailing-edge debouncer for a single value stream.
//!
//! [`Debouncer::feed`] replaces any pending emission with a new one scheduled
//! `window` after the call. When the timer fires, the emission is handed to the
//! sink as a [`Settled`] carrying the token it was scheduled under. Because the
//! sink usually forwards into a channel, an emission can already be queued when
//! a later `feed` supersedes it; the owner must pass every received emission
//! through [`Debouncer::accept`], which drops anything but the latest token.

use std::sync::Arc;
use std::time::Duration;

use enlist_worker::{GenerationClock, TaskClass};
use tokio::task::JoinHandle;

/// A value that stayed unchanged for the whole debounce window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T> {
	/// Token of the `feed` call that scheduled this emission.
	pub token: u64,
	pub value: T,
}

/// Callback receiving fired emissions. Runs on the timer task.
pub type SettleSink<T> = Arc<dyn Fn(Settled<T>) + Send + Sync>;

struct PendingEmit {
	handle: JoinHandle<()>,
	token: u64,
}

/// Debounces a stream of values, keeping at most one pending emission.
pub struct Debouncer<T> {
	window: Duration,
	clock: GenerationClock,
	pending: Option<PendingEmit>,
	sink: SettleSink<T>,
}

impl<T> Debouncer<T>
where
	T: Send + 'static,
{
	pub fn new(window: Duration, sink: SettleSink<T>) -> Self {
		Self {
			window,
			clock: GenerationClock::new(),
			pending: None,
			sink,
		}
	}

	pub fn window(&self) -> Duration {
		self.window
	}

	/// Schedules `value` for emission after the window, cancelling any
	/// previously scheduled emission.
	pub fn feed(&mut self, value: T) {
		self.cancel();
		let token = self.clock.next();
		let deadline = tokio::time::Instant::now() + self.window;
		let sink = Arc::clone(&self.sink);
		let handle = enlist_worker::spawn(TaskClass::Interactive, async move {
			tokio::time::sleep_until(deadline).await;
			sink(Settled { token, value });
		});
		self.pending = Some(PendingEmit { handle, token });
	}

	/// Claims a fired emission.
	///
	/// Returns the value only if `settled` belongs to the most recent `feed`
	/// and has not been claimed or cancelled yet.
	pub fn accept(&mut self, settled: Settled<T>) -> Option<T> {
		match &self.pending {
			Some(pending) if pending.token == settled.token => {
				self.pending = None;
				Some(settled.value)
			}
			_ => {
				tracing::trace!(token = settled.token, "debounce.superseded");
				None
			}
		}
	}

	/// Cancels the pending emission, if any.
	pub fn cancel(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.handle.abort();
		}
	}

	/// Returns true while an emission is scheduled or fired but unclaimed.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}

impl<T> Drop for Debouncer<T> {
	fn drop(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.handle.abort();
		}
	}
}

impl<T> std::fmt::Debug for Debouncer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Debouncer")
			.field("window", &self.window)
			.field("pending_token", &self.pending.as_ref().map(|p| p.token))
			.finish()
	}
}
