use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::SourceId;

/// Rejection from a [`Probe`]: the native failure signal plus the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("'{url}' failed to resolve: {reason}")]
pub struct ProbeFailure {
	pub url: SourceId,
	pub reason: String,
}

impl ProbeFailure {
	pub fn new(url: impl Into<SourceId>, reason: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			reason: reason.into(),
		}
	}
}

/// Off-screen resolution of one candidate.
///
/// Implementations attempt the source exactly once, with no internal retry or
/// timeout, and must not touch what is currently displayed.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
	async fn attempt(&self, url: &str) -> Result<(), ProbeFailure>;
}

#[async_trait]
impl<P: Probe + ?Sized> Probe for Arc<P> {
	async fn attempt(&self, url: &str) -> Result<(), ProbeFailure> {
		(**self).attempt(url).await
	}
}
