//! Element configuration.

use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::{SourceId, SourceInput};

/// Configuration of one fallback image element.
///
/// ```toml
/// source = ["https://cdn/a.webp", "https://cdn/a.png"]
/// fallback = "placeholder.png"
/// deadline_ms = 300
///
/// [attributes]
/// alt = "Avatar"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageProps {
	/// Candidate sources, tried in order.
	pub source: SourceInput,
	/// Designated substitute, shown on deadline expiry and initially when no deadline is set.
	pub fallback: Option<SourceId>,
	/// Deadline in milliseconds; zero disables the deadline.
	pub deadline_ms: u64,
	/// Presentation attributes forwarded verbatim to the rendered element.
	pub attributes: IndexMap<String, String>,
}

impl ImageProps {
	pub fn new(source: impl Into<SourceInput>) -> Self {
		Self {
			source: source.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn fallback(mut self, fallback: impl Into<SourceId>) -> Self {
		self.fallback = Some(fallback.into());
		self
	}

	#[must_use]
	pub fn deadline_ms(mut self, deadline_ms: u64) -> Self {
		self.deadline_ms = deadline_ms;
		self
	}

	#[must_use]
	pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}

	/// Configured deadline, `None` when disabled.
	pub fn deadline(&self) -> Option<Duration> {
		(self.deadline_ms > 0).then(|| Duration::from_millis(self.deadline_ms))
	}

	/// Value bound to the element before any session work completes.
	///
	/// With a deadline the element starts empty; otherwise it shows the
	/// fallback, then the first candidate.
	pub fn initial_display(&self) -> Option<SourceId> {
		if self.deadline().is_some() {
			return None;
		}
		self.fallback
			.clone()
			.filter(|fallback| !fallback.is_empty())
			.or_else(|| crate::CandidateQueue::from_input(&self.source).first().map(str::to_owned))
	}

	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}
}
