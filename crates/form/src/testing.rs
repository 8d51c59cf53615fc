//! Scripted lookup doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::capability::{LocationSource, NameDirectory};
use crate::error::LookupError;

#[derive(Debug, Clone)]
struct Script {
	latency: Duration,
	outcome: Result<bool, LookupError>,
	panics: bool,
}

/// Name directory with per-name latency and outcome.
///
/// Unscripted names are free and answer after `default_latency`. Every call is
/// recorded in issue order.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedDirectory {
	default_latency: Duration,
	scripts: Arc<Mutex<HashMap<String, Script>>>,
	calls: Arc<Mutex<Vec<String>>>,
	locations: Result<Vec<String>, LookupError>,
	locations_panic: bool,
}

impl ScriptedDirectory {
	pub(crate) fn new(default_latency: Duration) -> Self {
		Self {
			default_latency,
			scripts: Arc::default(),
			calls: Arc::default(),
			locations: Ok(vec!["Canada".to_string(), "China".to_string(), "USA".to_string(), "Brazil".to_string()]),
			locations_panic: false,
		}
	}

	pub(crate) fn with(self, name: &str, latency: Duration, outcome: Result<bool, LookupError>) -> Self {
		self.scripts
			.lock()
			.unwrap()
			.insert(name.to_string(), Script {
				latency,
				outcome,
				panics: false,
			});
		self
	}

	/// Lookups for `name` panic after `latency`.
	pub(crate) fn panicking(self, name: &str, latency: Duration) -> Self {
		self.scripts.lock().unwrap().insert(
			name.to_string(),
			Script {
				latency,
				outcome: Ok(false),
				panics: true,
			},
		);
		self
	}

	pub(crate) fn taken(self, name: &str) -> Self {
		let latency = self.default_latency;
		self.with(name, latency, Ok(true))
	}

	pub(crate) fn failing_locations(mut self) -> Self {
		self.locations = Err(LookupError::Unavailable("offline".to_string()));
		self
	}

	pub(crate) fn panicking_locations(mut self) -> Self {
		self.locations_panic = true;
		self
	}

	pub(crate) fn calls(&self) -> Vec<String> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl NameDirectory for ScriptedDirectory {
	async fn is_name_taken(&self, name: &str) -> Result<bool, LookupError> {
		self.calls.lock().unwrap().push(name.to_string());
		let script = self.scripts.lock().unwrap().get(name).cloned().unwrap_or(Script {
			latency: self.default_latency,
			outcome: Ok(false),
			panics: false,
		});
		tokio::time::sleep(script.latency).await;
		if script.panics {
			panic!("scripted lookup panic for {name}");
		}
		script.outcome
	}
}

#[async_trait]
impl LocationSource for ScriptedDirectory {
	async fn fetch_locations(&self) -> Result<Vec<String>, LookupError> {
		if self.locations_panic {
			panic!("scripted location fetch panic");
		}
		self.locations.clone()
	}
}
