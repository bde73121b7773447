//! Runs one element to completion and plays the part of the rendered element.

use cascade_image::{FailureRecord, FallbackImage, ImageProps, LoadRecord, Probe};
use serde_json::json;

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
	/// Value bound to the element once every session task settled.
	pub displayed: Option<String>,
	/// Whether the element itself managed to load the bound value.
	pub loaded: bool,
}

/// Mounts the element, waits for the loader and deadline, then loads the bound
/// value the way the rendered element would and reports it back.
///
/// Every notification is written to stdout as one JSON line.
pub async fn render(props: ImageProps, probe: impl Probe + Clone) -> Rendered {
	let mut image = FallbackImage::with_handlers(
		props,
		probe.clone(),
		Some(|record: LoadRecord| println!("{}", json!({"type": "success", "record": record}))),
		Some(|record: FailureRecord| println!("{}", json!({"type": "failure", "record": record}))),
	);
	tracing::debug!(attributes = ?image.attributes(), "cli.render.mount");

	image.settle().await;

	let displayed = image.displayed();
	let loaded = match displayed.as_deref().filter(|url| !url.is_empty()) {
		Some(url) => match probe.attempt(url).await {
			Ok(()) => {
				image.element_loaded();
				true
			}
			Err(failure) => {
				image.element_failed(failure.reason);
				false
			}
		},
		None => false,
	};
	tracing::info!(displayed = ?displayed, loaded, generation = image.generation(), "cli.render.done");
	Rendered { displayed, loaded }
}
