use std::path::PathBuf;

use async_trait::async_trait;
use cascade_image::{Probe, ProbeFailure};
use url::Url;

/// Resolves identifiers naming readable, non-empty local files.
///
/// Identifiers are plain paths or `file://` URLs; any other scheme is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl FsProbe {
	pub fn locate(url: &str) -> Result<PathBuf, ProbeFailure> {
		match Url::parse(url) {
			Ok(parsed) if parsed.scheme() == "file" => parsed
				.to_file_path()
				.map_err(|()| ProbeFailure::new(url, "file URL has no local path")),
			// Single-letter schemes are Windows drive prefixes.
			Ok(parsed) if parsed.scheme().len() > 1 => Err(ProbeFailure::new(url, format!("unsupported scheme '{}'", parsed.scheme()))),
			_ => Ok(PathBuf::from(url)),
		}
	}
}

#[async_trait]
impl Probe for FsProbe {
	async fn attempt(&self, url: &str) -> Result<(), ProbeFailure> {
		if url.is_empty() {
			return Err(ProbeFailure::new(url, "empty source"));
		}
		let path = Self::locate(url)?;
		let file = tokio::fs::File::open(&path).await.map_err(|error| ProbeFailure::new(url, error.to_string()))?;
		let metadata = file.metadata().await.map_err(|error| ProbeFailure::new(url, error.to_string()))?;
		if !metadata.is_file() {
			return Err(ProbeFailure::new(url, "not a regular file"));
		}
		if metadata.len() == 0 {
			return Err(ProbeFailure::new(url, "empty file"));
		}
		tracing::trace!(url, bytes = metadata.len(), "cli.probe.resolved");
		Ok(())
	}
}
