use std::path::{Path, PathBuf};

use reqwest::header::ACCEPT;
use serde::Serialize;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::{
    dash::{Manifest, PlanOptions, SegmentPlan},
    error::DumpResult,
    http::HttpClient,
};

pub const OUTPUT_FILE_NAME: &str = "output.bin";
const TEMP_DIR_PREFIX: &str = "video-mpd-";

/// What a [`DumpClient::process`] run selected and wrote.
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    pub resolution: Option<(u64, u64)>,
    pub bandwidth: u64,
    pub representation_id: Option<String>,
    /// Number of segments written, including the initialization segment
    pub segments: usize,
    pub output: PathBuf,
}

/// Downloads the best video of an MPD, segment by segment, into a single file.
pub struct DumpClient {
    client: HttpClient,
    options: PlanOptions,
}

impl DumpClient {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            options: PlanOptions::default(),
        }
    }

    pub fn with_plan_options(mut self, options: PlanOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn fetch_manifest(&self, url: &str) -> DumpResult<Manifest> {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, "application/dash+xml,video/vnd.mpeg.dash.mpd");
        let body = self.client.send(request).await?;
        let xml = std::str::from_utf8(&body)?;

        Manifest::parse(url, xml)
    }

    /// Fetches the manifest at `url` and appends every planned segment, in order, to
    /// `output.bin` inside `output_dir`.
    ///
    /// A fresh temporary directory is created when `output_dir` is `None`. The first
    /// failed segment aborts the whole run.
    pub async fn process(&self, url: &str, output_dir: Option<&Path>) -> DumpResult<DumpReport> {
        let manifest = self.fetch_manifest(url).await?;
        let plan = SegmentPlan::new(&manifest, self.options)?;

        let output_dir = match output_dir {
            Some(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                dir.to_path_buf()
            }
            None => tempfile::Builder::new()
                .prefix(TEMP_DIR_PREFIX)
                .tempdir()?
                .keep(),
        };
        let output = output_dir.join(OUTPUT_FILE_NAME);
        tracing::debug!("creating file {}", output.display());
        let mut file = File::create(&output).await?;

        let mut segments = 0;
        for segment in plan.segments() {
            let segment = segment?;
            let data = self.client.fetch(segment.url).await?;
            file.write_all(&data).await?;
            segments += 1;
        }
        file.flush().await?;

        Ok(DumpReport {
            resolution: plan.resolution(),
            bandwidth: plan.bandwidth(),
            representation_id: plan.representation().id.clone(),
            segments,
            output,
        })
    }
}
