use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::{FailureRecord, LoadRecord};

/// Consumer success handler.
pub type SuccessHandler = dyn Fn(LoadRecord) + Send + Sync;
/// Consumer failure handler.
pub type FailureHandler = dyn Fn(FailureRecord) + Send + Sync;

/// Latest consumer handlers.
///
/// Handlers are loaded when a notification is dispatched, never when the work
/// producing it was started, so replacing a handler mid-session redirects
/// every later notification. Missing handlers drop the notification.
#[derive(Default)]
pub struct CallbackDispatcher {
	on_success: ArcSwapOption<Box<SuccessHandler>>,
	on_failure: ArcSwapOption<Box<FailureHandler>>,
}

impl std::fmt::Debug for CallbackDispatcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CallbackDispatcher")
			.field("on_success", &self.on_success.load().is_some())
			.field("on_failure", &self.on_failure.load().is_some())
			.finish()
	}
}

impl CallbackDispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_success<F>(&self, handler: Option<F>)
	where
		F: Fn(LoadRecord) + Send + Sync + 'static,
	{
		self.on_success.store(handler.map(|f| Arc::new(Box::new(f) as Box<SuccessHandler>)));
	}

	pub fn set_failure<F>(&self, handler: Option<F>)
	where
		F: Fn(FailureRecord) + Send + Sync + 'static,
	{
		self.on_failure.store(handler.map(|f| Arc::new(Box::new(f) as Box<FailureHandler>)));
	}

	pub fn clear(&self) {
		self.on_success.store(None);
		self.on_failure.store(None);
	}

	pub fn success(&self, record: LoadRecord) {
		tracing::debug!(url = %record.url, is_init = record.is_init, is_fallback = ?record.is_fallback, "image.notify.success");
		if let Some(handler) = self.on_success.load_full() {
			handler(record);
		}
	}

	pub fn failure(&self, record: FailureRecord) {
		tracing::debug!(url = ?record.url, error = %record.error, "image.notify.failure");
		if let Some(handler) = self.on_failure.load_full() {
			handler(record);
		}
	}
}
