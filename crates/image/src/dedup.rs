use rustc_hash::FxHashSet;

use crate::SourceId;

/// Identifiers already reported as failed within one session.
#[derive(Debug, Default, Clone)]
pub struct ErrorDeduper {
	reported: FxHashSet<SourceId>,
}

impl ErrorDeduper {
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks `url` as reported. Returns `true` only the first time.
	pub fn report(&mut self, url: &str) -> bool {
		if self.reported.contains(url) {
			return false;
		}
		self.reported.insert(url.to_owned())
	}

	pub fn contains(&self, url: &str) -> bool {
		self.reported.contains(url)
	}

	pub fn len(&self) -> usize {
		self.reported.len()
	}

	pub fn is_empty(&self) -> bool {
		self.reported.is_empty()
	}
}
