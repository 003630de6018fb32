//! Picture workflows: daily ingestion and stored-picture queries.

mod ingest;
mod query;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use common::MediaError;
use common::storage::{FileStore, StorageError};
use reqwest::Url;
use thiserror::Error;

use crate::config::AppConfig;
use crate::fetcher::{FetchError, PictureSource};
use crate::repository::{PictureRepository, StoreError};

pub use ingest::FetchOutcome;
pub use query::StoredFilter;

#[derive(Debug, Error)]
pub enum PictureError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{operation} affected {actual} rows, expected {expected}")]
    UnexpectedRows {
        operation: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error(transparent)]
    File(#[from] StorageError),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid file name: {0}")]
    InvalidName(String),

    #[error("{0}")]
    NotFound(String),

    #[error("deadline exceeded while {0}")]
    Timeout(&'static str),
}

/// Everything the workflows need from configuration.
#[derive(Debug, Clone)]
pub struct PictureSettings {
    pub endpoint: Url,
    pub api_key: String,
    /// Base of the download links handed out by queries.
    pub public_url: String,
    pub deadline: Duration,
}

impl PictureSettings {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&config.apod.endpoint)
            .with_context(|| format!("invalid apod endpoint {:?}", config.apod.endpoint))?;
        Ok(Self {
            endpoint,
            api_key: config.apod.api_key.clone(),
            public_url: config.server.public_url.trim_end_matches('/').to_string(),
            deadline: config.workflow.deadline(),
        })
    }
}

/// Composes the upstream source, the Picture Store and the File Store.
pub struct PictureService {
    repo: Arc<dyn PictureRepository>,
    files: Arc<dyn FileStore>,
    source: Arc<dyn PictureSource>,
    settings: PictureSettings,
}

impl PictureService {
    pub fn new(
        repo: Arc<dyn PictureRepository>,
        files: Arc<dyn FileStore>,
        source: Arc<dyn PictureSource>,
        settings: PictureSettings,
    ) -> Self {
        Self {
            repo,
            files,
            source,
            settings,
        }
    }
}
