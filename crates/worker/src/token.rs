use tokio_util::sync::CancellationToken;

/// Monotonic generation counter owned by a single state holder.
///
/// Generations start at 1 so that 0 never matches a live generation.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	current: u64,
}

impl GenerationClock {
	/// Creates a clock that has not issued any generation yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances the clock and returns the new generation.
	pub fn next(&mut self) -> u64 {
		self.current = self.current.wrapping_add(1);
		self.current
	}

	/// Returns the most recently issued generation (0 if none).
	pub const fn current(&self) -> u64 {
		self.current
	}
}

/// Generation-scoped cancellation token for one unit of spawned work.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	/// Creates a fresh, uncancelled token for `generation`.
	pub fn new(generation: u64) -> Self {
		Self {
			generation,
			cancel: CancellationToken::new(),
		}
	}

	pub const fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation. Idempotent.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Future resolving when cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}
