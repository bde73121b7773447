//! Sequential source fallback for a single displayed image element.
//!
//! A [`FallbackImage`] owns an ordered list of candidate sources. Each
//! configuration runs one *session*: candidates are resolved off-screen one at
//! a time through a [`Probe`], the first success becomes the displayed source,
//! and an optional deadline swaps in a designated fallback when nothing
//! resolved in time. The host element reports its own load/error events back
//! through [`FallbackImage::element_loaded`] and
//! [`FallbackImage::element_failed`]; all three paths share one per-session
//! record so consumers see each success and failure exactly once.
//!
//! * [`CandidateQueue`]: normalized candidate list for one session
//! * [`Probe`]: off-screen resolution of one candidate
//! * [`LoadRecord`] / [`FailureRecord`]: notifications handed to consumer handlers
//! * [`ImageProps`]: serde-backed configuration of one element

mod candidates;
mod config;
mod dedup;
mod deadline;
mod dispatch;
mod display;
mod error;
mod image;
mod loader;
mod probe;
mod record;
mod session;

pub use candidates::{CandidateQueue, SourceId, SourceInput};
pub use config::ImageProps;
pub use dedup::ErrorDeduper;
pub use dispatch::{CallbackDispatcher, FailureHandler, SuccessHandler};
pub use error::{ConfigError, LoadError};
pub use image::FallbackImage;
pub use probe::{Probe, ProbeFailure};
pub use record::{FailureEvent, FailureRecord, FallbackRank, LoadRecord};
pub use session::LoaderState;
