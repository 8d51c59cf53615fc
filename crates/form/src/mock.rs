//! In-process stand-in for the remote lookup service.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::capability::{LocationSource, NameDirectory};
use crate::config::MockConfig;
use crate::error::LookupError;

/// The only name the mock service reports as taken.
pub const TAKEN_NAME: &str = "invalid name";

/// Locations served by the mock service, in display order.
pub const MOCK_LOCATIONS: [&str; 4] = ["Canada", "China", "USA", "Brazil"];

/// Mock lookup service with random per-call latency.
///
/// Name checks resolve after a uniformly random delay in `[0, max_latency)`,
/// so concurrent checks routinely complete out of issue order. Locations
/// resolve immediately.
#[derive(Debug, Clone)]
pub struct MockDirectory {
	max_latency: Duration,
}

impl MockDirectory {
	pub fn new(max_latency: Duration) -> Self {
		Self { max_latency }
	}

	pub fn from_config(config: &MockConfig) -> Self {
		Self::new(Duration::from_millis(config.max_latency_ms))
	}

	fn sample_latency(&self) -> Duration {
		let max_ms = self.max_latency.as_millis() as u64;
		if max_ms == 0 {
			return Duration::ZERO;
		}
		Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
	}
}

impl Default for MockDirectory {
	fn default() -> Self {
		Self::from_config(&MockConfig::default())
	}
}

#[async_trait]
impl NameDirectory for MockDirectory {
	async fn is_name_taken(&self, name: &str) -> Result<bool, LookupError> {
		let latency = self.sample_latency();
		tracing::trace!(name, latency_ms = latency.as_millis() as u64, "mock.name_check");
		tokio::time::sleep(latency).await;
		Ok(name == TAKEN_NAME)
	}
}

#[async_trait]
impl LocationSource for MockDirectory {
	async fn fetch_locations(&self) -> Result<Vec<String>, LookupError> {
		Ok(MOCK_LOCATIONS.iter().map(|l| l.to_string()).collect())
	}
}
