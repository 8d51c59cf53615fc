//! Error types for the form core.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by an external lookup capability.
///
/// Lookup failures never escape the session; the name field records them as
/// an explicit unknown state and the location picker as a failed load.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
	/// The remote service could not be reached.
	#[error("lookup service unavailable: {0}")]
	Unavailable(String),
	/// The service answered with something that could not be interpreted.
	#[error("malformed lookup response: {0}")]
	Malformed(String),
	/// The lookup task panicked or was aborted before answering.
	#[error("lookup task failed: {0}")]
	Panicked(String),
}

impl From<tokio::task::JoinError> for LookupError {
	fn from(error: tokio::task::JoinError) -> Self {
		if error.is_panic() {
			Self::Panicked("lookup panicked".to_string())
		} else {
			Self::Panicked("lookup aborted".to_string())
		}
	}
}

/// Errors that can occur while loading [`crate::FormConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or an unknown/mistyped key.
	#[error("failed to parse {path}: {error}")]
	Parse {
		/// Path to the file that failed to parse.
		path: PathBuf,
		/// The underlying TOML error.
		error: toml::de::Error,
	},

	/// The debounce window must be non-zero.
	#[error("debounce_ms must be greater than zero")]
	ZeroDebounce,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
