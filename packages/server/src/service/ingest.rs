use std::future::Future;

use chrono::NaiveDate;
use common::picture::{extension, select_url};
use tokio::time::{Instant, timeout_at};
use tracing::{error, info, instrument, warn};

use super::{PictureError, PictureService};
use crate::fetcher::metadata_request;

/// Successful end states of the daily ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Today's picture was ingested by an earlier call; nothing was fetched.
    AlreadyStored(String),
    Downloaded(String),
}

impl FetchOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::AlreadyStored(_) => "already stored",
            Self::Downloaded(_) => "successfully downloaded",
        }
    }

    /// The selected download URL.
    pub fn url(&self) -> &str {
        match self {
            Self::AlreadyStored(url) | Self::Downloaded(url) => url,
        }
    }
}

/// Run one workflow step against the shared deadline.
pub(super) async fn bounded<T, E>(
    deadline: Instant,
    step: &'static str,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, PictureError>
where
    PictureError: From<E>,
{
    match timeout_at(deadline, fut).await {
        Ok(result) => result.map_err(PictureError::from),
        Err(_) => Err(PictureError::Timeout(step)),
    }
}

impl PictureService {
    /// Ingest the picture of `today`.
    ///
    /// Metadata is inserted before the file is written; if the write fails the
    /// row is deleted again so no metadata outlives a missing file.
    #[instrument(skip(self))]
    pub async fn fetch_today(&self, today: NaiveDate) -> Result<FetchOutcome, PictureError> {
        let deadline = Instant::now() + self.settings.deadline;

        let existing = bounded(deadline, "checking the store", self.repo.get_by_date(today)).await?;
        if let Some(existing) = existing {
            let url = select_url(&existing)?.to_string();
            info!(url = %url, "picture already stored");
            return Ok(FetchOutcome::AlreadyStored(url));
        }

        let request = metadata_request(&self.settings.endpoint, &self.settings.api_key, today);
        let mut record = bounded(
            deadline,
            "fetching metadata",
            self.source.fetch_metadata(&request),
        )
        .await?;

        if record.date != today {
            warn!(
                upstream = %record.date,
                "upstream returned another date, keeping the requested one"
            );
            record.date = today;
        }

        let url = select_url(&record)?.to_string();
        let ext = extension(&url)?;

        record.raw = bounded(deadline, "downloading the picture", self.source.fetch_bytes(&url))
            .await?;

        let inserted = match bounded(deadline, "saving metadata", self.repo.insert_one(&record)).await
        {
            Ok(n) => n,
            Err(err @ PictureError::Timeout(_)) => {
                // The insert may still have committed. A row committed by a
                // concurrent call for the same date is removed as well; the
                // next call ingests it again and keeps the existing file.
                self.compensate(today).await;
                return Err(err);
            }
            Err(err) => return Err(err),
        };
        if inserted != 1 {
            return Err(PictureError::UnexpectedRows {
                operation: "insert",
                expected: 1,
                actual: inserted,
            });
        }

        let name = record.file_name(ext);
        let written = bounded(
            deadline,
            "writing the picture",
            self.files.write(&name, &record.raw),
        )
        .await;
        if let Err(err) = written {
            error!(error = %err, file = %name, "failed to store picture, removing its metadata");
            self.compensate(today).await;
            return Err(err);
        }

        info!(url = %url, file = %name, bytes = record.raw.len(), "picture downloaded");
        Ok(FetchOutcome::Downloaded(url))
    }

    /// Undo the metadata insert. Failures are logged only.
    async fn compensate(&self, date: NaiveDate) {
        let deadline = Instant::now() + self.settings.deadline;
        match bounded(deadline, "removing metadata", self.repo.delete_by_date(date)).await {
            Ok(1) => info!(%date, "metadata removed"),
            Ok(rows) => error!(%date, rows, "unexpected row count while removing metadata"),
            Err(err) => error!(%date, error = %err, "failed to remove metadata"),
        }
    }
}
