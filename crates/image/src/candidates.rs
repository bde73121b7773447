use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier of one displayable source (a URL or path).
pub type SourceId = String;

/// Source input as supplied by the consumer: one identifier or an ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceInput {
	One(SourceId),
	Many(Vec<SourceId>),
	#[default]
	None,
}

impl From<&str> for SourceInput {
	fn from(value: &str) -> Self {
		Self::One(value.to_owned())
	}
}

impl From<String> for SourceInput {
	fn from(value: String) -> Self {
		Self::One(value)
	}
}

impl<T: Into<SourceId>> From<Vec<T>> for SourceInput {
	fn from(values: Vec<T>) -> Self {
		Self::Many(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<SourceId>, const N: usize> From<[T; N]> for SourceInput {
	fn from(values: [T; N]) -> Self {
		Self::Many(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<SourceInput>> From<Option<T>> for SourceInput {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::None, Into::into)
	}
}

/// Ordered, immutable candidate list for one loading session.
///
/// Repeated identifiers are kept at every position; the rank of an identifier
/// is the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateQueue {
	items: Arc<[SourceId]>,
}

impl CandidateQueue {
	/// Normalizes consumer input. An empty scalar yields an empty queue.
	pub fn from_input(input: &SourceInput) -> Self {
		let items: Arc<[SourceId]> = match input {
			SourceInput::One(url) if url.is_empty() => Arc::from([]),
			SourceInput::One(url) => Arc::from([url.clone()]),
			SourceInput::Many(urls) => urls.iter().cloned().collect(),
			SourceInput::None => Arc::from([]),
		};
		Self { items }
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn first(&self) -> Option<&str> {
		self.items.first().map(String::as_str)
	}

	pub fn get(&self, index: usize) -> Option<&str> {
		self.items.get(index).map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.items.iter().map(String::as_str)
	}

	/// Position of the first occurrence of `url` in the original input.
	pub fn rank(&self, url: &str) -> Option<usize> {
		self.items.iter().position(|item| item == url)
	}
}
