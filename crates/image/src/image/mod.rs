use std::sync::Arc;

use cascade_worker::{GenerationClock, TaskClass};
use indexmap::IndexMap;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::deadline::DeadlineFallback;
use crate::display::DisplayState;
use crate::loader::SequentialLoader;
use crate::session::Session;
use crate::{CandidateQueue, FailureRecord, ImageProps, LoadRecord, LoaderState, Probe, SourceId};


/// A displayed image element backed by an ordered list of candidate sources.
///
/// Construction binds the initial value and starts the first session. Each
/// later [`update`](Self::update) that changes the candidates or the fallback
/// cancels the running session and starts a new one; work from a superseded
/// session can no longer touch the bound value or notify handlers.
///
/// Background work is spawned on the ambient tokio runtime.
pub struct FallbackImage {
	state: Arc<DisplayState>,
	probe: Arc<dyn Probe>,
	clock: GenerationClock,
	props: ImageProps,
	candidates: CandidateQueue,
	tasks: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for FallbackImage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FallbackImage")
			.field("props", &self.props)
			.field("displayed", &self.state.displayed())
			.field("generation", &self.state.generation())
			.field("loader", &self.state.loader_state())
			.finish_non_exhaustive()
	}
}

impl FallbackImage {
	/// Creates the element and starts its first session.
	pub fn new(props: ImageProps, probe: impl Probe) -> Self {
		Self::with_handlers(props, probe, None::<fn(LoadRecord)>, None::<fn(FailureRecord)>)
	}

	/// Creates the element with handlers installed before the first session starts.
	///
	/// Handlers installed after construction miss notifications raised
	/// synchronously at session start, such as the missing-source error.
	pub fn with_handlers<S, F>(props: ImageProps, probe: impl Probe, on_success: Option<S>, on_failure: Option<F>) -> Self
	where
		S: Fn(LoadRecord) + Send + Sync + 'static,
		F: Fn(FailureRecord) + Send + Sync + 'static,
	{
		let state = Arc::new(DisplayState::new(props.initial_display()));
		state.dispatcher().set_success(on_success);
		state.dispatcher().set_failure(on_failure);

		let mut image = Self {
			state,
			probe: Arc::new(probe),
			clock: GenerationClock::new(),
			candidates: CandidateQueue::from_input(&props.source),
			props,
			tasks: Vec::new(),
		};
		image.start_session();
		image
	}

	/// Applies a new configuration.
	///
	/// A new session starts only when the normalized candidate list or the
	/// fallback identifier changed. Deadline and attribute changes are kept
	/// and take effect from the next session.
	pub fn update(&mut self, props: ImageProps) {
		let candidates = CandidateQueue::from_input(&props.source);
		let restart = candidates != self.candidates || props.fallback != self.props.fallback;
		self.candidates = candidates;
		self.props = props;
		if restart {
			self.start_session();
		}
	}

	/// Replaces the success handler; in-flight work reports to the new one.
	pub fn on_success<F>(&self, handler: F)
	where
		F: Fn(LoadRecord) + Send + Sync + 'static,
	{
		self.state.dispatcher().set_success(Some(handler));
	}

	/// Replaces the failure handler; in-flight work reports to the new one.
	pub fn on_failure<F>(&self, handler: F)
	where
		F: Fn(FailureRecord) + Send + Sync + 'static,
	{
		self.state.dispatcher().set_failure(Some(handler));
	}

	/// Removes both handlers.
	pub fn clear_handlers(&self) {
		self.state.dispatcher().clear();
	}

	/// Native load event from the rendered element.
	pub fn element_loaded(&self) {
		self.state.element_loaded();
	}

	/// Native error event from the rendered element.
	pub fn element_failed(&self, reason: impl Into<String>) {
		self.state.element_failed(reason.into());
	}

	/// Value currently bound to the rendered element.
	pub fn displayed(&self) -> Option<SourceId> {
		self.state.displayed()
	}

	/// Watches the bound value; the host re-binds its element on every change.
	pub fn subscribe(&self) -> watch::Receiver<Option<SourceId>> {
		self.state.subscribe()
	}

	/// Generation of the current session, starting at 1.
	pub fn generation(&self) -> u64 {
		self.state.generation()
	}

	pub fn loader_state(&self) -> LoaderState {
		self.state.loader_state()
	}

	pub fn props(&self) -> &ImageProps {
		&self.props
	}

	/// Presentation attributes for the rendered element, unmodified.
	pub fn attributes(&self) -> &IndexMap<String, String> {
		&self.props.attributes
	}

	/// Waits for the current session's loader and deadline to finish.
	pub async fn settle(&mut self) {
		for task in std::mem::take(&mut self.tasks) {
			if let Err(error) = task.await {
				tracing::warn!(%error, "image.session.task_failed");
			}
		}
	}

	fn start_session(&mut self) {
		let token = self.clock.supersede();
		let generation = token.generation();
		tracing::debug!(
			generation,
			candidates = self.candidates.len(),
			fallback = ?self.props.fallback,
			deadline_ms = self.props.deadline_ms,
			"image.session.start"
		);

		let session = Session::new(generation, self.candidates.clone(), self.props.fallback.clone());
		self.tasks.clear();
		if self.state.begin(session) {
			let loader = SequentialLoader {
				state: Arc::clone(&self.state),
				probe: Arc::clone(&self.probe),
				token: token.child(),
				candidates: self.candidates.clone(),
			};
			self.tasks.push(cascade_worker::spawn(TaskClass::Probe, &token, async move {
				if let Some(outcome) = loader.run().await {
					tracing::debug!(generation, ?outcome, "image.session.loader_settled");
				}
			}));

			if let Some(after) = self.props.deadline() {
				let deadline = DeadlineFallback {
					state: Arc::clone(&self.state),
					token: token.child(),
					after,
				};
				self.tasks.push(cascade_worker::spawn(TaskClass::Timer, &token, deadline.run()));
			}
		}
	}
}

impl Drop for FallbackImage {
	fn drop(&mut self) {
		self.clock.retire();
	}
}
