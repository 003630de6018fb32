use chrono::NaiveDate;
use common::picture::{DATE_FORMAT, extension, select_url};
use common::{ImageExtension, PictureRecord};
use tokio::time::Instant;
use tracing::{instrument, warn};

use super::ingest::bounded;
use super::{PictureError, PictureService};
use crate::utils::filename::validate_flat_filename;

/// Which stored pictures to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredFilter {
    Date(NaiveDate),
    /// Inclusive on both ends.
    Range { start: NaiveDate, end: NaiveDate },
}

impl StoredFilter {
    /// Build a filter from raw query parameters. Empty values count as absent.
    pub fn from_params(
        date: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, PictureError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        match (present(date), present(start_date), present(end_date)) {
            (Some(date), None, None) => Ok(Self::Date(parse_date("date", date)?)),
            (None, Some(start), Some(end)) => {
                let start = parse_date("start_date", start)?;
                let end = parse_date("end_date", end)?;
                if start > end {
                    return Err(PictureError::InvalidParams(
                        "start_date must not be after end_date".into(),
                    ));
                }
                Ok(Self::Range { start, end })
            }
            (Some(_), _, _) => Err(PictureError::InvalidParams(
                "date cannot be combined with start_date or end_date".into(),
            )),
            (None, Some(_), None) | (None, None, Some(_)) => Err(PictureError::InvalidParams(
                "start_date and end_date must be given together".into(),
            )),
            (None, None, None) => Err(PictureError::InvalidParams(
                "either date or start_date and end_date are required".into(),
            )),
        }
    }
}

/// Parse a zero-padded `YYYY-MM-DD` date.
fn parse_date(name: &str, value: &str) -> Result<NaiveDate, PictureError> {
    let invalid = || PictureError::InvalidParams(format!("{name} must be formatted as YYYY-MM-DD"));
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

impl PictureService {
    /// Download links for the stored pictures matching `filter`.
    ///
    /// Records whose link cannot be derived are logged and left out.
    #[instrument(skip(self))]
    pub async fn list_stored(&self, filter: StoredFilter) -> Result<Vec<String>, PictureError> {
        let deadline = Instant::now() + self.settings.deadline;

        let records = match filter {
            StoredFilter::Date(date) => {
                let record = bounded(deadline, "querying the store", self.repo.get_by_date(date))
                    .await?
                    .ok_or_else(|| PictureError::NotFound(format!("no picture stored for {date}")))?;
                vec![record]
            }
            StoredFilter::Range { start, end } => {
                bounded(
                    deadline,
                    "querying the store",
                    self.repo.get_by_date_range(start, end),
                )
                .await?
            }
        };

        Ok(records
            .iter()
            .filter_map(|record| self.download_link(record))
            .collect())
    }

    fn download_link(&self, record: &PictureRecord) -> Option<String> {
        match select_url(record).and_then(extension) {
            Ok(ext) => Some(format!(
                "{}/v1/storage?name={}",
                self.settings.public_url,
                record.file_name(ext)
            )),
            Err(err) => {
                warn!(date = %record.date, error = %err, "skipping record without a download link");
                None
            }
        }
    }

    /// Read a stored picture by its `{date}.{ext}` name.
    #[instrument(skip(self))]
    pub async fn read_file(&self, name: &str) -> Result<(Vec<u8>, ImageExtension), PictureError> {
        let name = validate_flat_filename(name)
            .map_err(|e| PictureError::InvalidName(e.message().into()))?;
        let ext = extension(name).map_err(|e| PictureError::InvalidName(e.to_string()))?;

        let deadline = Instant::now() + self.settings.deadline;
        let data = bounded(deadline, "reading the picture", self.files.read(name)).await?;
        Ok((data, ext))
    }
}
