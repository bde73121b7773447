#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cascade_image::{FailureRecord, FallbackImage, ImageProps, LoadRecord, Probe, ProbeFailure};
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy)]
struct Step {
	delay: Duration,
	resolves: bool,
}

/// Probe with a fixed delay and outcome per identifier. Unknown identifiers
/// fail immediately.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProbe {
	script: Arc<Mutex<HashMap<String, Step>>>,
	attempts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProbe {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn resolves(self, url: &str, after_ms: u64) -> Self {
		self.script(url, after_ms, true)
	}

	pub fn fails(self, url: &str, after_ms: u64) -> Self {
		self.script(url, after_ms, false)
	}

	fn script(self, url: &str, after_ms: u64, resolves: bool) -> Self {
		self.script.lock().insert(
			url.to_owned(),
			Step {
				delay: Duration::from_millis(after_ms),
				resolves,
			},
		);
		self
	}

	pub fn attempts(&self) -> Vec<String> {
		self.attempts.lock().clone()
	}
}

#[async_trait]
impl Probe for ScriptedProbe {
	async fn attempt(&self, url: &str) -> Result<(), ProbeFailure> {
		self.attempts.lock().push(url.to_owned());
		let step = self.script.lock().get(url).copied();
		let Some(step) = step else {
			return Err(ProbeFailure::new(url, "unscripted"));
		};
		tokio::time::sleep(step.delay).await;
		if step.resolves { Ok(()) } else { Err(ProbeFailure::new(url, "scripted failure")) }
	}
}

/// One notification as observed by the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
	Success(LoadRecord),
	Failure(FailureRecord),
}

impl Seen {
	pub fn url(&self) -> Option<&str> {
		match self {
			Self::Success(record) => Some(&record.url),
			Self::Failure(record) => record.url.as_deref(),
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}
}

/// Ordered log of every notification.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
	seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
	pub fn seen(&self) -> Vec<Seen> {
		self.seen.lock().clone()
	}

	pub fn successes(&self) -> Vec<LoadRecord> {
		self.seen()
			.into_iter()
			.filter_map(|seen| match seen {
				Seen::Success(record) => Some(record),
				Seen::Failure(_) => None,
			})
			.collect()
	}

	pub fn failures(&self) -> Vec<FailureRecord> {
		self.seen()
			.into_iter()
			.filter_map(|seen| match seen {
				Seen::Failure(record) => Some(record),
				Seen::Success(_) => None,
			})
			.collect()
	}

	pub fn record_success(&self, record: LoadRecord) {
		self.seen.lock().push(Seen::Success(record));
	}

	/// Builds an element whose handlers log into this recorder.
	pub fn mount(&self, props: ImageProps, probe: ScriptedProbe) -> FallbackImage {
		let on_success = Arc::clone(&self.seen);
		let on_failure = Arc::clone(&self.seen);
		FallbackImage::with_handlers(
			props,
			probe,
			Some(move |record: LoadRecord| on_success.lock().push(Seen::Success(record))),
			Some(move |record: FailureRecord| on_failure.lock().push(Seen::Failure(record))),
		)
	}
}

pub async fn advance_ms(ms: u64) {
	tokio::time::sleep(Duration::from_millis(ms)).await;
}
