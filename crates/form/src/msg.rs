//! Message bus between spawned work and the session.
//!
//! Debounce timers, name checks and the location fetch run on spawned tasks.
//! They never touch session state; they send a [`FormMsg`] instead, and the
//! owner applies queued messages with [`crate::FormSession::drain_messages`]
//! or [`crate::FormSession::pump`].
//!
//! ```text
//! debounce timer ─┐
//! name check     ─┼──► FormMsg ──► drain_messages()/pump() ──► session state
//! location fetch ─┘
//! ```

use tokio::sync::mpsc;

use crate::FormSession;
use crate::debounce::Settled;
use crate::error::LookupError;
use crate::validation::CheckComplete;

bitflags::bitflags! {
	/// Parts of the view changed by a command or message.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Dirty: u8 {
		/// Name text, validation status or indicator.
		const NAME = 1 << 0;
		/// Location list or selection.
		const LOCATIONS = 1 << 1;
		/// Committed records.
		const RECORDS = 1 << 2;
	}
}

impl Dirty {
	pub const NONE: Self = Self::empty();

	pub fn needs_redraw(self) -> bool {
		!self.is_empty()
	}
}

/// Channel sender handed to spawned tasks.
pub type MsgSender = mpsc::UnboundedSender<FormMsg>;

/// Channel receiver drained by the session.
pub type MsgReceiver = mpsc::UnboundedReceiver<FormMsg>;

/// Creates a new message channel pair.
pub fn channel() -> (MsgSender, MsgReceiver) {
	mpsc::unbounded_channel()
}

/// Completion delivered from spawned work.
#[derive(Debug)]
pub enum FormMsg {
	/// The debounce window elapsed for a typed value.
	NameSettled(Settled<String>),
	/// A name check finished.
	NameChecked(CheckComplete),
	/// The location fetch finished.
	LocationsLoaded(Result<Vec<String>, LookupError>),
}

impl FormMsg {
	/// Applies this message to the session, returning dirty flags.
	pub fn apply(self, session: &mut FormSession) -> Dirty {
		match self {
			Self::NameSettled(settled) => session.apply_name_settled(settled),
			Self::NameChecked(done) => session.apply_name_checked(done),
			Self::LocationsLoaded(result) => session.apply_locations_loaded(result),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn none_needs_no_redraw() {
		assert!(!Dirty::NONE.needs_redraw());
		assert!((Dirty::NAME | Dirty::RECORDS).needs_redraw());
	}
}
