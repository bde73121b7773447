use std::path::PathBuf;

use anyhow::Context;
use cascade_image::{ImageProps, SourceInput};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cascade")]
#[command(about = "Resolve the first loadable image from an ordered list of sources")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Candidate sources (paths or file:// URLs), tried in order
	pub sources: Vec<String>,

	/// Fallback source shown when nothing resolves before the deadline
	#[arg(long, short = 'f')]
	pub fallback: Option<String>,

	/// Deadline in milliseconds before the fallback is shown (0 disables)
	#[arg(long, short = 'd', value_name = "MS")]
	pub deadline_ms: Option<u64>,

	/// Element attribute forwarded verbatim, as KEY=VALUE
	#[arg(long = "attr", short = 'a', value_name = "KEY=VALUE", value_parser = parse_attribute)]
	pub attributes: Vec<(String, String)>,

	/// TOML file describing the element; flags override its values
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,
}

impl Cli {
	/// Merges the optional config file with command-line overrides.
	pub fn props(&self) -> anyhow::Result<ImageProps> {
		let mut props = match &self.config {
			Some(path) => ImageProps::load(path).with_context(|| format!("loading {}", path.display()))?,
			None => ImageProps::default(),
		};
		if !self.sources.is_empty() {
			props.source = SourceInput::Many(self.sources.clone());
		}
		if let Some(fallback) = &self.fallback {
			props.fallback = Some(fallback.clone());
		}
		if let Some(deadline_ms) = self.deadline_ms {
			props.deadline_ms = deadline_ms;
		}
		props.attributes.extend(self.attributes.iter().cloned());
		Ok(props)
	}
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
	let (key, value) = raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
	if key.is_empty() {
		return Err(format!("empty attribute name in '{raw}'"));
	}
	Ok((key.to_owned(), value.to_owned()))
}
