use std::sync::Arc;
use std::time::Duration;

use cascade_worker::GenerationToken;

use crate::display::DisplayState;

/// One-shot timer substituting the fallback identifier when nothing resolved in time.
pub(crate) struct DeadlineFallback {
	pub(crate) state: Arc<DisplayState>,
	pub(crate) token: GenerationToken,
	pub(crate) after: Duration,
}

impl DeadlineFallback {
	pub(crate) async fn run(self) {
		tokio::select! {
			biased;
			_ = self.token.cancelled() => {
				tracing::trace!(generation = self.token.generation(), "image.deadline.cancelled");
			}
			_ = tokio::time::sleep(self.after) => {
				tracing::debug!(generation = self.token.generation(), after_ms = self.after.as_millis() as u64, "image.deadline.expired");
				self.state.expire_deadline(self.token.generation());
			}
		}
	}
}
