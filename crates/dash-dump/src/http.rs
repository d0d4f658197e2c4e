use std::{ops::Deref, time::Duration};

use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, ClientBuilder, IntoUrl, RequestBuilder,
};

use crate::error::{DumpError, DumpResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:96.0) Gecko/20100101 Firefox/96.0";

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds a client sending `Accept: */*` and `user_agent` with every request.
    ///
    /// Headers already present in `headers` take precedence.
    pub fn new(
        builder: ClientBuilder,
        mut headers: HeaderMap,
        user_agent: &str,
        timeout: Duration,
    ) -> DumpResult<Self> {
        headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static("*/*"));

        let client = builder
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_defaults() -> DumpResult<Self> {
        Self::new(
            Client::builder(),
            HeaderMap::new(),
            DEFAULT_USER_AGENT,
            DEFAULT_TIMEOUT,
        )
    }

    /// GETs `url` and returns the whole body, failing on a non-success status.
    pub async fn fetch<U>(&self, url: U) -> DumpResult<Bytes>
    where
        U: IntoUrl,
    {
        self.send(self.client.get(url)).await
    }

    pub async fn send(&self, request: RequestBuilder) -> DumpResult<Bytes> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            if let Ok(body) = response.text().await {
                tracing::warn!("Error body: {body}");
            }
            return Err(DumpError::HttpError(status));
        }

        Ok(response.bytes().await?)
    }
}

impl Deref for HttpClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
