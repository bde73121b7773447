use crate::{CandidateQueue, ErrorDeduper, FallbackRank, LoadRecord, SourceId};

/// Progress of the sequential loader within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
	/// Session created, nothing probed yet.
	Idle,
	/// Waiting on the probe for the candidate at this index.
	Probing(usize),
	/// The candidate at this index resolved; remaining candidates were skipped.
	Resolved(usize),
	/// Every candidate failed, or there was nothing to probe.
	Exhausted,
}

impl LoaderState {
	pub const fn is_settled(self) -> bool {
		matches!(self, Self::Resolved(_) | Self::Exhausted)
	}
}

/// Per-session record shared by the loader, the deadline and the element bridge.
#[derive(Debug)]
pub(crate) struct Session {
	pub(crate) generation: u64,
	pub(crate) candidates: CandidateQueue,
	pub(crate) fallback: Option<SourceId>,
	pub(crate) notified: bool,
	pub(crate) failures: ErrorDeduper,
	pub(crate) loader: LoaderState,
}

impl Session {
	pub(crate) fn new(generation: u64, candidates: CandidateQueue, fallback: Option<SourceId>) -> Self {
		Self {
			generation,
			candidates,
			fallback: fallback.filter(|fallback| !fallback.is_empty()),
			notified: false,
			failures: ErrorDeduper::new(),
			loader: LoaderState::Idle,
		}
	}

	/// Placeholder record for an element that has not started a session yet.
	pub(crate) fn detached() -> Self {
		Self::new(0, CandidateQueue::default(), None)
	}

	pub(crate) fn is_current(&self, generation: u64) -> bool {
		self.generation == generation
	}

	pub(crate) fn lacks_source(&self) -> bool {
		self.candidates.is_empty() && self.fallback.is_none()
	}

	fn is_fallback(&self, url: &str) -> bool {
		self.fallback.as_deref() == Some(url)
	}

	/// Success record for a candidate resolved by the loader.
	pub(crate) fn candidate_record(&self, url: &str, index: usize) -> LoadRecord {
		LoadRecord {
			url: url.to_owned(),
			is_init: self.is_fallback(url),
			is_fallback: FallbackRank::Rank(self.candidates.rank(url).unwrap_or(index)),
		}
	}

	/// Success record for whatever the element reported as loaded.
	pub(crate) fn displayed_record(&self, url: &str) -> LoadRecord {
		let is_init = self.is_fallback(url);
		let is_fallback = if is_init {
			FallbackRank::Flag(true)
		} else {
			FallbackRank::Rank(self.candidates.rank(url).unwrap_or(0))
		};
		LoadRecord {
			url: url.to_owned(),
			is_init,
			is_fallback,
		}
	}

	/// Success record for the deadline substitution.
	pub(crate) fn deadline_record(url: &str) -> LoadRecord {
		LoadRecord {
			url: url.to_owned(),
			is_init: true,
			is_fallback: FallbackRank::Flag(true),
		}
	}
}
