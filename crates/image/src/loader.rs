use std::sync::Arc;

use cascade_worker::GenerationToken;

use crate::display::DisplayState;
use crate::{CandidateQueue, LoaderState, Probe};

/// Drives one session's candidates through the probe, strictly in order.
pub(crate) struct SequentialLoader {
	pub(crate) state: Arc<DisplayState>,
	pub(crate) probe: Arc<dyn Probe>,
	pub(crate) token: GenerationToken,
	pub(crate) candidates: CandidateQueue,
}

impl SequentialLoader {
	/// Probes until the first success. Returns `None` when superseded by a
	/// newer session before settling.
	pub(crate) async fn run(self) -> Option<LoaderState> {
		let generation = self.token.generation();
		for (index, url) in self.candidates.iter().enumerate() {
			if !self.state.advance(generation, LoaderState::Probing(index)) {
				return None;
			}
			tracing::trace!(generation, index, url, "image.probe.start");

			let attempt = tokio::select! {
				biased;
				_ = self.token.cancelled() => {
					tracing::trace!(generation, index, url, "image.probe.cancelled");
					return None;
				}
				attempt = self.probe.attempt(url) => attempt,
			};

			match attempt {
				Ok(()) => {
					tracing::debug!(generation, index, url, "image.probe.resolved");
					self.state.resolve_candidate(generation, index, url);
					return Some(LoaderState::Resolved(index));
				}
				Err(failure) => {
					tracing::debug!(generation, index, url, reason = %failure.reason, "image.probe.failed");
					self.state.reject_candidate(generation, failure);
				}
			}
		}

		tracing::debug!(generation, candidates = self.candidates.len(), "image.probe.exhausted");
		self.state
			.advance(generation, LoaderState::Exhausted)
			.then_some(LoaderState::Exhausted)
	}
}
