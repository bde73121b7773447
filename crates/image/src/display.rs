//! The value bound to the rendered element and the per-session notification record.
//!
//! Every mutation path (loader, deadline, element events) goes through
//! [`DisplayState`]. Paths carrying a generation are dropped once that
//! generation has been superseded. Handlers run after the session lock is
//! released so they may call back into the element.

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::dispatch::CallbackDispatcher;
use crate::session::{LoaderState, Session};
use crate::{FailureEvent, FailureRecord, LoadError, LoadRecord, ProbeFailure, SourceId};

enum Notification {
	Success(LoadRecord),
	Failure(FailureRecord),
}

#[derive(Debug)]
pub(crate) struct DisplayState {
	bound: watch::Sender<Option<SourceId>>,
	session: Mutex<Session>,
	dispatcher: CallbackDispatcher,
}

impl DisplayState {
	pub(crate) fn new(initial: Option<SourceId>) -> Self {
		Self {
			bound: watch::Sender::new(initial),
			session: Mutex::new(Session::detached()),
			dispatcher: CallbackDispatcher::new(),
		}
	}

	pub(crate) fn dispatcher(&self) -> &CallbackDispatcher {
		&self.dispatcher
	}

	pub(crate) fn displayed(&self) -> Option<SourceId> {
		self.bound.borrow().clone()
	}

	pub(crate) fn subscribe(&self) -> watch::Receiver<Option<SourceId>> {
		self.bound.subscribe()
	}

	pub(crate) fn generation(&self) -> u64 {
		self.session.lock().generation
	}

	pub(crate) fn loader_state(&self) -> LoaderState {
		self.session.lock().loader
	}

	/// Replaces the session record. Returns `false` when the session has
	/// nothing to load, after reporting the configuration error.
	pub(crate) fn begin(&self, session: Session) -> bool {
		let notification = {
			let mut current = self.session.lock();
			*current = session;
			if !current.lacks_source() {
				return true;
			}
			current.loader = LoaderState::Exhausted;
			tracing::warn!(generation = current.generation, "image.session.missing_source");
			Notification::Failure(FailureRecord {
				event: FailureEvent::Synthetic,
				url: None,
				error: LoadError::MissingSource,
			})
		};
		self.dispatch(notification);
		false
	}

	/// Records loader progress. Returns `false` if `generation` is stale.
	pub(crate) fn advance(&self, generation: u64, state: LoaderState) -> bool {
		let mut session = self.session.lock();
		if !session.is_current(generation) {
			tracing::trace!(generation, current = session.generation, "image.stale.advance");
			return false;
		}
		session.loader = state;
		true
	}

	/// Loader success for the candidate at `index`.
	///
	/// Swaps the bound value and notifies only when the candidate differs from
	/// what is displayed; the loader settles either way.
	pub(crate) fn resolve_candidate(&self, generation: u64, index: usize, url: &str) {
		let notification = {
			let mut session = self.session.lock();
			if !session.is_current(generation) {
				tracing::trace!(generation, url, "image.stale.resolve");
				return;
			}
			session.loader = LoaderState::Resolved(index);
			if !self.bind(url) {
				tracing::debug!(generation, url, "image.resolve.already_displayed");
				return;
			}
			session.notified = true;
			Notification::Success(session.candidate_record(url, index))
		};
		self.dispatch(notification);
	}

	/// Loader failure for one candidate, reported once per identifier.
	pub(crate) fn reject_candidate(&self, generation: u64, failure: ProbeFailure) {
		let notification = {
			let mut session = self.session.lock();
			if !session.is_current(generation) {
				tracing::trace!(generation, url = %failure.url, "image.stale.reject");
				return;
			}
			if !session.failures.report(&failure.url) {
				return;
			}
			Notification::Failure(FailureRecord {
				error: LoadError::Candidate { url: failure.url.clone() },
				url: Some(failure.url),
				event: FailureEvent::Probe { reason: failure.reason },
			})
		};
		self.dispatch(notification);
	}

	/// Deadline expiry: substitute the fallback unless a success was already reported.
	pub(crate) fn expire_deadline(&self, generation: u64) {
		let notification = {
			let mut session = self.session.lock();
			if !session.is_current(generation) {
				tracing::trace!(generation, "image.stale.deadline");
				return;
			}
			if session.notified {
				tracing::debug!(generation, "image.deadline.already_notified");
				return;
			}
			let Some(fallback) = session.fallback.clone() else {
				tracing::debug!(generation, "image.deadline.no_fallback");
				return;
			};
			self.bind(&fallback);
			session.notified = true;
			Notification::Success(Session::deadline_record(&fallback))
		};
		self.dispatch(notification);
	}

	/// Native load signal from the element for its currently bound value.
	pub(crate) fn element_loaded(&self) {
		let notification = {
			let mut session = self.session.lock();
			if session.notified {
				return;
			}
			let Some(url) = self.displayed().filter(|url| !url.is_empty()) else {
				return;
			};
			session.notified = true;
			Notification::Success(session.displayed_record(&url))
		};
		self.dispatch(notification);
	}

	/// Native failure signal from the element for its currently bound value.
	pub(crate) fn element_failed(&self, reason: String) {
		let notification = {
			let mut session = self.session.lock();
			let Some(url) = self.displayed().filter(|url| !url.is_empty()) else {
				return;
			};
			if !session.failures.report(&url) {
				return;
			}
			Notification::Failure(FailureRecord {
				event: FailureEvent::Element { reason },
				error: LoadError::Element { url: url.clone() },
				url: Some(url),
			})
		};
		self.dispatch(notification);
	}

	/// Binds `url` to the element. Returns `false` if it was already bound.
	fn bind(&self, url: &str) -> bool {
		self.bound.send_if_modified(|bound| {
			if bound.as_deref() == Some(url) {
				return false;
			}
			*bound = Some(url.to_owned());
			true
		})
	}

	fn dispatch(&self, notification: Notification) {
		match notification {
			Notification::Success(record) => self.dispatcher.success(record),
			Notification::Failure(record) => self.dispatcher.failure(record),
		}
	}
}
