//! Error types carried in failure notifications and raised by configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::SourceId;

/// Descriptive error attached to a [`FailureRecord`](crate::FailureRecord).
///
/// None of these are fatal: the element stays renderable and the session
/// simply moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// Neither a candidate nor a fallback identifier was configured.
	#[error("at least one source or a fallback identifier is required")]
	MissingSource,

	/// A candidate failed to resolve off-screen.
	#[error("fallback candidate '{url}' can't be loaded")]
	Candidate {
		/// The candidate that failed.
		url: SourceId,
	},

	/// The displayed element failed to load its bound value.
	#[error("element with '{url}' can't be loaded")]
	Element {
		/// The value bound to the element at the time of failure.
		url: SourceId,
	},
}

/// Errors raised while loading [`ImageProps`](crate::ImageProps).
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

	/// Error parsing TOML.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
