use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::input::NameStatus;
use crate::testing::ScriptedDirectory;
use crate::view::{Indicator, NAME_TAKEN_MESSAGE};

const LATENCY: Duration = Duration::from_millis(100);

fn session_with(config: &FormConfig, directory: &ScriptedDirectory) -> FormSession {
	let directory = Arc::new(directory.clone());
	FormSession::new(config, directory.clone(), directory)
}

async fn ready_session(directory: &ScriptedDirectory) -> FormSession {
	let mut session = session_with(&FormConfig::default(), directory);
	let dirty = session.pump_until_idle().await;
	assert!(dirty.contains(Dirty::LOCATIONS));
	session
}

fn record(name: &str, location: &str) -> Record {
	Record {
		name: name.to_string(),
		location: location.to_string(),
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn locations_load_at_start() {
	let directory = ScriptedDirectory::new(LATENCY);
	let session = ready_session(&directory).await;
	assert_eq!(session.locations().options(), &["Canada", "China", "USA", "Brazil"].map(String::from));
	assert_eq!(session.locations().load_state(), &LoadState::Ready);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_location_fetch_leaves_list_empty() {
	let directory = ScriptedDirectory::new(LATENCY).failing_locations();
	let mut session = session_with(&FormConfig::default(), &directory);
	session.pump_until_idle().await;
	assert!(session.locations().options().is_empty());
	assert!(matches!(session.locations().load_state(), LoadState::Failed(_)));
	assert_eq!(session.on_location_change("Canada"), Dirty::NONE);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn keystroke_marks_validating_before_debounce() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	assert_eq!(session.on_raw_value_change("a"), Dirty::NAME);
	assert_eq!(session.name().raw(), "a");
	assert!(session.name().is_validating());
	assert!(directory.calls().is_empty());
	assert!(session.view().is_validating);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn taken_name_keeps_gate_closed() {
	let directory = ScriptedDirectory::new(LATENCY).taken("invalid name");
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("invalid name");
	session.pump_until_idle().await;
	assert!(!session.name().is_validating());
	assert!(!session.name().is_valid());

	session.on_location_change("Canada");
	assert!(!session.is_enabled());
	assert_eq!(session.on_commit(), None);
	assert!(session.records().is_empty());

	let view = session.view();
	assert_eq!(view.name_indicator, Indicator::Error);
	assert_eq!(view.name_error, Some(NAME_TAKEN_MESSAGE));
	assert!(!view.can_add);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn valid_name_and_location_commit_and_reset() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("alice");
	session.pump_until_idle().await;
	assert!(session.name().is_valid());
	assert!(!session.is_enabled());

	assert_eq!(session.on_location_change("Canada"), Dirty::LOCATIONS);
	assert!(session.is_enabled());

	let committed = session.on_commit();
	assert_eq!(committed, Some(record("alice", "Canada")));
	assert_eq!(session.records().list(), &[record("alice", "Canada")]);
	assert_eq!(session.name().raw(), "");
	assert_eq!(session.name().status(), NameStatus::Idle);
	assert_eq!(session.locations().selected(), "");
	assert!(!session.is_enabled());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn typing_within_window_checks_only_final_value() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("al");
	tokio::time::sleep(Duration::from_millis(100)).await;
	session.on_raw_value_change("alice");
	session.pump_until_idle().await;

	assert_eq!(directory.calls(), vec!["alice".to_string()]);
	assert!(session.name().is_valid());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn late_result_for_replaced_value_is_discarded() {
	let directory = ScriptedDirectory::new(LATENCY).with("bob", Duration::from_millis(1000), Ok(true));
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("bob");
	assert_eq!(session.pump().await, Dirty::NONE);
	assert_eq!(session.checks_in_flight(), 1);

	session.on_raw_value_change("bobby");
	assert_eq!(session.pump().await, Dirty::NONE);
	assert_eq!(session.checks_in_flight(), 2);

	// bobby answers first and governs.
	assert_eq!(session.pump().await, Dirty::NAME);
	assert!(session.name().is_valid());

	// bob answers "taken" afterwards and must not touch the field.
	assert_eq!(session.pump().await, Dirty::NONE);
	assert!(session.name().is_valid());
	assert!(!session.name().is_validating());
	assert_eq!(session.name().raw(), "bobby");
	assert_eq!(directory.calls(), vec!["bob".to_string(), "bobby".to_string()]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn stale_result_arriving_first_keeps_validating() {
	let directory = ScriptedDirectory::new(LATENCY)
		.with("bob", Duration::from_millis(500), Ok(false))
		.with("bobby", Duration::from_millis(2000), Ok(false));
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("bob");
	session.pump().await;
	session.on_raw_value_change("bobby");
	session.pump().await;
	assert_eq!(session.checks_in_flight(), 2);

	// bob completes while bobby is still in flight.
	assert_eq!(session.pump().await, Dirty::NONE);
	assert!(session.name().is_validating());
	assert!(!session.name().is_valid());

	assert_eq!(session.pump().await, Dirty::NAME);
	assert!(session.name().is_valid());
}

/// Types `bob`, lets its check start, then edits away and back so the old
/// check lands while a fresh debounce emission for `bob` is still pending.
async fn bob_resolved_with_settle_pending(directory: &ScriptedDirectory) -> FormSession {
	let mut session = ready_session(directory).await;

	session.on_raw_value_change("bob");
	assert_eq!(session.pump().await, Dirty::NONE);
	assert_eq!(session.checks_in_flight(), 1);

	tokio::time::sleep(Duration::from_millis(300)).await;
	session.on_raw_value_change("bobx");
	session.on_raw_value_change("bob");
	session.on_location_change("Canada");

	assert_eq!(session.pump().await, Dirty::NAME);
	assert!(session.name().is_valid());
	assert!(session.is_enabled());
	assert!(session.has_pending_work());
	session
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn settle_revalidates_value_resolved_by_older_check() {
	let directory = ScriptedDirectory::new(LATENCY).with("bob", Duration::from_millis(500), Ok(false));
	let mut session = bob_resolved_with_settle_pending(&directory).await;

	// The pending emission settles and issues a new check for the same value.
	assert_eq!(session.pump().await, Dirty::NAME);
	assert!(session.name().is_validating());
	assert!(!session.name().is_valid());
	assert!(!session.is_enabled());
	assert_eq!(session.checks_in_flight(), 1);
	assert_eq!(session.on_commit(), None);

	assert_eq!(session.pump().await, Dirty::NAME);
	assert!(session.name().is_valid());
	assert!(session.is_enabled());
	assert_eq!(directory.calls(), vec!["bob".to_string(), "bob".to_string()]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn commit_cancels_pending_settle() {
	let directory = ScriptedDirectory::new(LATENCY).with("bob", Duration::from_millis(500), Ok(false));
	let mut session = bob_resolved_with_settle_pending(&directory).await;

	assert_eq!(session.on_commit(), Some(record("bob", "Canada")));
	assert!(!session.has_pending_work());

	tokio::time::sleep(Duration::from_secs(2)).await;
	assert_eq!(session.drain_messages(), Dirty::NONE);
	assert_eq!(session.checks_in_flight(), 0);
	assert_eq!(session.name().status(), NameStatus::Idle);
	assert_eq!(directory.calls(), vec!["bob".to_string()]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn panicking_name_lookup_resolves_unknown() {
	let directory = ScriptedDirectory::new(LATENCY).panicking("eve", LATENCY);
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("eve");
	session.on_location_change("USA");
	session.pump_until_idle().await;

	assert_eq!(session.checks_in_flight(), 0);
	assert_eq!(session.name().status(), NameStatus::Unknown);
	assert!(!session.is_enabled());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn panicking_location_fetch_fails_load() {
	let directory = ScriptedDirectory::new(LATENCY).panicking_locations();
	let mut session = session_with(&FormConfig::default(), &directory);

	assert!(session.pump_until_idle().await.contains(Dirty::LOCATIONS));
	assert!(matches!(session.locations().load_state(), LoadState::Failed(LookupError::Panicked(_))));
	assert!(session.locations().options().is_empty());
	assert_eq!(session.view().location_indicator, Indicator::Error);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn commit_while_closed_gate_is_noop() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	assert_eq!(session.on_commit(), None);

	session.on_raw_value_change("alice");
	session.on_location_change("USA");
	assert_eq!(session.on_commit(), None);
	assert!(session.records().is_empty());
	assert_eq!(session.name().raw(), "alice");
	assert_eq!(session.locations().selected(), "USA");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn blank_name_never_enables_gate() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("   ");
	session.on_location_change("Brazil");
	session.pump_until_idle().await;

	assert_eq!(session.name().status(), NameStatus::Available);
	assert!(!session.is_enabled());
	assert_eq!(session.on_commit(), None);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn clear_empties_records_and_gate_still_applies() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	for (name, location) in [("alice", "Canada"), ("bob", "USA")] {
		session.on_raw_value_change(name);
		session.on_location_change(location);
		session.pump_until_idle().await;
		assert!(session.on_commit().is_some());
	}
	assert_eq!(session.records().list(), &[record("alice", "Canada"), record("bob", "USA")]);
	assert!(session.view().can_clear);

	assert_eq!(session.on_clear(), Dirty::RECORDS);
	assert!(session.records().is_empty());
	assert_eq!(session.on_clear(), Dirty::NONE);

	assert_eq!(session.on_commit(), None);
	assert!(session.records().is_empty());

	session.on_raw_value_change("carol");
	session.on_location_change("China");
	session.pump_until_idle().await;
	assert_eq!(session.on_commit(), Some(record("carol", "China")));
	assert_eq!(session.records().len(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn lookup_failure_is_unknown_not_valid() {
	let directory = ScriptedDirectory::new(LATENCY).with("eve", LATENCY, Err(LookupError::Unavailable("timeout".to_string())));
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("eve");
	session.on_location_change("USA");
	session.pump_until_idle().await;

	assert_eq!(session.name().status(), NameStatus::Unknown);
	assert!(!session.name().is_valid());
	assert!(!session.is_enabled());
	assert_eq!(session.view().name_indicator, Indicator::Unknown);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn check_completing_after_commit_is_stale() {
	let directory = ScriptedDirectory::new(LATENCY).with("al", Duration::from_millis(1500), Ok(false));
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("al");
	session.pump().await;
	session.on_raw_value_change("alice");
	session.on_location_change("Canada");
	session.pump().await;
	session.pump().await;
	assert!(session.on_commit().is_some());
	assert_eq!(session.checks_in_flight(), 1);

	assert_eq!(session.pump_until_idle().await, Dirty::NONE);
	assert_eq!(session.name().status(), NameStatus::Idle);
	assert_eq!(session.name().raw(), "");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn superseded_checks_are_cancelled() {
	let directory = ScriptedDirectory::new(LATENCY).with("bob", Duration::from_millis(1000), Ok(false));
	let config = FormConfig {
		supersede_in_flight: true,
		..FormConfig::default()
	};
	let mut session = session_with(&config, &directory);
	session.pump_until_idle().await;

	session.on_raw_value_change("bob");
	session.pump().await;
	session.on_raw_value_change("bobby");
	session.pump().await;
	assert_eq!(session.checks_in_flight(), 1);

	session.pump_until_idle().await;
	assert!(session.name().is_valid());
	assert_eq!(session.name().raw(), "bobby");

	tokio::time::sleep(Duration::from_millis(2000)).await;
	assert_eq!(session.drain_messages(), Dirty::NONE);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn close_cancels_pending_work() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("alice");
	session.close();
	assert!(session.is_closed());
	assert!(!session.has_pending_work());

	tokio::time::sleep(Duration::from_secs(5)).await;
	assert_eq!(session.drain_messages(), Dirty::NONE);
	assert!(directory.calls().is_empty());
	assert_eq!(session.on_raw_value_change("bob"), Dirty::NONE);
	assert_eq!(session.name().raw(), "alice");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn forged_settle_token_issues_no_check() {
	let directory = ScriptedDirectory::new(LATENCY);
	let mut session = ready_session(&directory).await;

	session.on_raw_value_change("alice");
	let forged = FormMsg::NameSettled(Settled {
		token: 999,
		value: "mallory".to_string(),
	});
	assert!(session.msg_tx().send(forged).is_ok());
	assert_eq!(session.drain_messages(), Dirty::NONE);
	assert_eq!(session.checks_in_flight(), 0);

	session.pump_until_idle().await;
	assert_eq!(directory.calls(), vec!["alice".to_string()]);
}
