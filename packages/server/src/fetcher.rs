//! Outbound calls to the picture-of-the-day service.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::PictureRecord;
use common::picture::DATE_FORMAT;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout or non-success status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed metadata: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Query parameters set on every metadata request.
const REQUEST_PARAMS: [&str; 4] = ["api_key", "date", "hd", "thumbs"];

/// Build the metadata request for `date`.
///
/// Other query parameters already present on `base` are kept; earlier values
/// of the request parameters are replaced.
pub fn metadata_request(base: &Url, api_key: &str, date: NaiveDate) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| !REQUEST_PARAMS.iter().any(|param| key == param))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(&kept)
        .append_pair("api_key", api_key)
        .append_pair("date", &date.format(DATE_FORMAT).to_string())
        .append_pair("hd", "true")
        .append_pair("thumbs", "true");
    url
}

/// Source of picture metadata and payloads.
#[async_trait]
pub trait PictureSource: Send + Sync {
    async fn fetch_metadata(&self, request: &Url) -> Result<PictureRecord, FetchError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`PictureSource`] talking to the upstream service over HTTP.
#[derive(Clone)]
pub struct ApodClient {
    http: Client,
}

impl ApodClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PictureSource for ApodClient {
    #[instrument(skip(self, request), fields(host = request.host_str()))]
    async fn fetch_metadata(&self, request: &Url) -> Result<PictureRecord, FetchError> {
        let body = self
            .http
            .get(request.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let record: PictureRecord = serde_json::from_slice(&body)?;
        debug!(date = %record.date, media_type = %record.media_type, "metadata received");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        debug!(bytes = body.len(), "payload received");
        Ok(body.to_vec())
    }
}
