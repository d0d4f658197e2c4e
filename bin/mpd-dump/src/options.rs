use std::{str::FromStr, time::Duration};

use anyhow::Context;
use clap::Args;
use dash_dump::{
    dash::{PlanOptions, TimelineCoverage},
    HttpClient,
};
use fake_user_agent::get_chrome_rua;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};

#[derive(Args, Clone, Debug)]
pub struct HttpOptions {
    /// Additional HTTP headers, in `Name: value` form
    #[clap(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// HTTP timeout, in seconds
    #[clap(short, long, default_value = "10")]
    pub timeout: u64,

    /// User agent sent with every request. A random browser user agent is used when absent
    #[clap(long, env = "MPD_DUMP_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl HttpOptions {
    pub fn into_client(self) -> anyhow::Result<HttpClient> {
        let mut headers = HeaderMap::new();
        for header in &self.headers {
            let (key, value) = header
                .split_once(':')
                .with_context(|| format!("Invalid header: {header}"))?;
            headers.insert(
                HeaderName::from_str(key.trim()).context("Invalid header name")?,
                HeaderValue::from_str(value.trim()).context("Invalid header value")?,
            );
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| get_chrome_rua().to_string());

        Ok(HttpClient::new(
            Client::builder(),
            headers,
            &user_agent,
            Duration::from_secs(self.timeout),
        )?)
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct SelectionOptions {
    /// Index of the period to dump
    #[clap(short, long, default_value = "0")]
    pub period: usize,

    /// Expand every entry of a SegmentTimeline instead of the first one only
    #[clap(long)]
    pub full_timeline: bool,
}

impl SelectionOptions {
    pub fn to_plan_options(&self) -> PlanOptions {
        PlanOptions {
            period: self.period,
            timeline: if self.full_timeline {
                TimelineCoverage::Complete
            } else {
                TimelineCoverage::FirstEntry
            },
        }
    }
}
