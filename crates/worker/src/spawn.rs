use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::{GenerationToken, TaskClass};

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static FALLBACK_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = FALLBACK_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("cascade-session")
			.build()
			.expect("failed to build cascade fallback tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns session work inside a `session` span carrying its generation.
///
/// Runs on the current tokio runtime; outside of one, a single-worker
/// fallback runtime is started on first use.
pub fn spawn<F>(class: TaskClass, token: &GenerationToken, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	let span = tracing::debug_span!("session", generation = token.generation(), class = class.as_str());
	tracing::trace!(parent: &span, "worker.spawn");
	runtime_handle().spawn(fut.instrument(span))
}
