//! `cascade`: resolve the first loadable image from an ordered list of local sources.

mod cli;
mod host;
mod probe;

use clap::Parser;
use cli::Cli;
use probe::FsProbe;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let props = cli.props()?;
	let rendered = host::render(props, FsProbe).await;

	match rendered.displayed {
		Some(url) if rendered.loaded => {
			println!("{}", serde_json::json!({"type": "displayed", "url": url}));
			Ok(())
		}
		Some(url) => anyhow::bail!("displayed source '{url}' failed to load"),
		None => anyhow::bail!("no source could be displayed"),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("cascade_image=trace,cascade_cli=debug,info")
		} else {
			EnvFilter::new("cascade_image=info,cascade_cli=info,warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
