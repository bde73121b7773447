use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Issues session generations. Only the most recent generation is live:
/// issuing a new one cancels every token of the one before.
#[derive(Debug, Default)]
pub struct GenerationClock {
	next: AtomicU64,
	live: Mutex<Option<GenerationToken>>,
}

impl GenerationClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Cancels the live generation, if any, and issues the next one.
	pub fn supersede(&self) -> GenerationToken {
		let token = GenerationToken {
			generation: self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1),
			cancel: CancellationToken::new(),
		};
		let previous = self.swap(Some(token.clone()));
		if let Some(previous) = previous {
			tracing::trace!(superseded = previous.generation, generation = token.generation, "worker.generation.supersede");
			previous.cancel.cancel();
		}
		token
	}

	/// Cancels the live generation without issuing another.
	pub fn retire(&self) {
		if let Some(previous) = self.swap(None) {
			tracing::trace!(generation = previous.generation, "worker.generation.retire");
			previous.cancel.cancel();
		}
	}

	/// Live generation, or 0 when none was issued or it was retired.
	pub fn live(&self) -> u64 {
		match self.live.lock() {
			Ok(guard) => guard.as_ref().map_or(0, GenerationToken::generation),
			Err(poisoned) => poisoned.into_inner().as_ref().map_or(0, GenerationToken::generation),
		}
	}

	fn swap(&self, token: Option<GenerationToken>) -> Option<GenerationToken> {
		match self.live.lock() {
			Ok(mut guard) => std::mem::replace(&mut *guard, token),
			Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), token),
		}
	}
}

/// Cancellation handle held by work started under one generation.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true once the generation was superseded or retired.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Resolves once the generation was superseded or retired.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}

	/// Token for one task of this generation.
	pub fn child(&self) -> Self {
		Self {
			generation: self.generation,
			cancel: self.cancel.child_token(),
		}
	}
}
