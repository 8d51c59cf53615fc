//! Form configuration.
//!
//! Configuration is read from TOML. Every key is optional:
//!
//! ```toml
//! # Quiescence window before a typed name is checked.
//! debounce_ms = 300
//! # Cancel older in-flight name checks when a newer one is issued.
//! supersede_in_flight = false
//!
//! [mock]
//! # Upper bound of the simulated lookup latency.
//! max_latency_ms = 2000
//! ```
//!
//! The default location is `$XDG_CONFIG_HOME/enlist/config.toml`
//! (or `~/.config/enlist/config.toml`). A missing default file yields
//! [`FormConfig::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Default debounce window for name checks.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default upper bound of [`crate::MockDirectory`] latency.
pub const DEFAULT_MOCK_MAX_LATENCY_MS: u64 = 2000;

/// Settings for the form session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
	/// Quiescence window in milliseconds.
	pub debounce_ms: u64,
	/// Cancel older in-flight checks when a newer check is issued.
	pub supersede_in_flight: bool,
	/// Settings for the bundled mock lookup service.
	pub mock: MockConfig,
}

/// Settings for [`crate::MockDirectory`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockConfig {
	/// Each name check resolves after a random latency below this bound.
	pub max_latency_ms: u64,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE_MS,
			supersede_in_flight: false,
			mock: MockConfig::default(),
		}
	}
}

impl Default for MockConfig {
	fn default() -> Self {
		Self {
			max_latency_ms: DEFAULT_MOCK_MAX_LATENCY_MS,
		}
	}
}

impl FormConfig {
	/// Returns the debounce window.
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Parses configuration from TOML text. `path` is only used for error reporting.
	pub fn parse(input: &str, path: &Path) -> Result<Self> {
		let config: Self = toml::from_str(input).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from an explicit file. The file must exist.
	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&input, path)
	}

	/// Loads configuration from [`Self::default_path`], falling back to
	/// defaults when no file is present.
	pub fn load_default() -> Result<Self> {
		match Self::default_path() {
			Some(path) if path.is_file() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}

	/// Returns the default configuration file path, if a config directory exists.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("enlist").join("config.toml"))
	}

	fn validate(&self) -> Result<()> {
		if self.debounce_ms == 0 {
			return Err(ConfigError::ZeroDebounce);
		}
		Ok(())
	}
}
