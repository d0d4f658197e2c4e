use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dash_dump::DumpClient;
use tracing_subscriber::EnvFilter;
use url::Url;

mod options;

use options::{HttpOptions, SelectionOptions};

#[derive(Parser, Clone, Debug)]
#[clap(name = "mpd-dump", version, about)]
struct DumpArgs {
    #[clap(flatten)]
    http: HttpOptions,

    #[clap(flatten)]
    selection: SelectionOptions,

    /// Directory to write `output.bin` into. Defaults to a new temporary directory
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Only print the manifest structure, without downloading anything
    #[clap(long)]
    list: bool,

    /// Print machine readable JSON instead of text
    #[clap(long)]
    json: bool,

    /// URL of the MPD manifest
    url: String,
}

impl DumpArgs {
    async fn run(self) -> anyhow::Result<()> {
        Url::parse(&self.url).context("invalid URL provided")?;

        let client = DumpClient::new(self.http.into_client()?)
            .with_plan_options(self.selection.to_plan_options());

        if self.list {
            let manifest = client
                .fetch_manifest(&self.url)
                .await
                .context("unable to fetch manifest")?;
            let summary = manifest.summary();
            if self.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{summary}");
            }
            return Ok(());
        }

        let report = client
            .process(&self.url, self.output.as_deref())
            .await
            .context("unable to dump stream")?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            tracing::info!(
                segments = report.segments,
                bandwidth = report.bandwidth,
                "saved to {}",
                report.output.display()
            );
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mpd_dump=debug,dash_dump=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    DumpArgs::parse().run().await
}
