use serde::{Serialize, Serializer};

use crate::{LoadError, SourceId};

/// Why a source is displayed, as reported in [`LoadRecord::is_fallback`].
///
/// `Flag(true)` marks the designated fallback identifier; `Rank(i)` is the
/// candidate's position in the original input. `Rank(0)` and `Flag(false)` are
/// both falsy and consumers historically cannot tell them apart, so the two
/// shapes are kept distinct here but compare equal under [`Self::is_truthy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FallbackRank {
	Flag(bool),
	Rank(usize),
}

impl FallbackRank {
	pub const fn is_truthy(self) -> bool {
		match self {
			Self::Flag(flag) => flag,
			Self::Rank(rank) => rank != 0,
		}
	}
}

/// Success notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRecord {
	pub url: SourceId,
	pub is_init: bool,
	pub is_fallback: FallbackRank,
}

/// Origin of a failure notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureEvent {
	/// Off-screen probe rejected the candidate.
	Probe { reason: String },
	/// The displayed element raised its native error signal.
	Element { reason: String },
	/// Raised by the session itself, with no underlying signal.
	Synthetic,
}

/// Failure notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
	pub event: FailureEvent,
	pub url: Option<SourceId>,
	#[serde(serialize_with = "serialize_display")]
	pub error: LoadError,
}

fn serialize_display<S: Serializer>(error: &LoadError, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn rank_zero_is_as_falsy_as_false() {
		assert!(!FallbackRank::Rank(0).is_truthy());
		assert!(!FallbackRank::Flag(false).is_truthy());
		assert!(FallbackRank::Rank(2).is_truthy());
		assert!(FallbackRank::Flag(true).is_truthy());
		assert_ne!(FallbackRank::Rank(0), FallbackRank::Flag(false));
	}

	#[test]
	fn load_record_serializes_camel_case_with_bare_rank() {
		let record = LoadRecord {
			url: "b.png".into(),
			is_init: false,
			is_fallback: FallbackRank::Rank(2),
		};
		assert_eq!(serde_json::to_value(&record).unwrap(), json!({"url": "b.png", "isInit": false, "isFallback": 2}));

		let record = LoadRecord {
			url: "init.png".into(),
			is_init: true,
			is_fallback: FallbackRank::Flag(true),
		};
		assert_eq!(serde_json::to_value(&record).unwrap()["isFallback"], json!(true));
	}

	#[test]
	fn failure_record_serializes_error_message() {
		let record = FailureRecord {
			event: FailureEvent::Synthetic,
			url: None,
			error: LoadError::MissingSource,
		};
		assert_eq!(
			serde_json::to_value(&record).unwrap(),
			json!({
				"event": {"kind": "synthetic"},
				"url": null,
				"error": "at least one source or a fallback identifier is required",
			})
		);
	}
}
