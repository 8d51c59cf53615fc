/// Validation state of the name field.
///
/// `Validating` is entered synchronously on every keystroke, before the value
/// settles, and left only when a check for the current value completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStatus {
	/// Nothing typed since the session started or the last commit.
	#[default]
	Idle,
	/// A keystroke happened and no check for the current value has completed.
	Validating,
	/// The latest check for the current value reported the name as free.
	Available,
	/// The latest check for the current value reported the name as taken.
	Taken,
	/// The latest check for the current value failed.
	Unknown,
}

impl NameStatus {
	pub const fn label(self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Validating => "validating",
			Self::Available => "available",
			Self::Taken => "taken",
			Self::Unknown => "unknown",
		}
	}
}

/// Raw text of the name field plus its validation status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameInput {
	raw: String,
	status: NameStatus,
}

impl NameInput {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn raw(&self) -> &str {
		&self.raw
	}

	pub fn status(&self) -> NameStatus {
		self.status
	}

	pub fn is_validating(&self) -> bool {
		self.status == NameStatus::Validating
	}

	/// Meaningful only when [`Self::is_validating`] is false.
	pub fn is_valid(&self) -> bool {
		self.status == NameStatus::Available
	}

	pub fn is_blank(&self) -> bool {
		self.raw.trim().is_empty()
	}

	/// Records a keystroke: the raw value changes and validation restarts.
	pub fn edit(&mut self, raw: String) {
		self.raw = raw;
		self.status = NameStatus::Validating;
	}

	/// Restarts validation for the current value without editing it.
	pub(crate) fn mark_validating(&mut self) {
		self.status = NameStatus::Validating;
	}

	/// Stores a check outcome for the current value.
	pub(crate) fn resolve(&mut self, status: NameStatus) {
		self.status = status;
	}

	/// Empties the field without scheduling validation.
	pub fn reset(&mut self) {
		self.raw.clear();
		self.status = NameStatus::Idle;
	}
}
