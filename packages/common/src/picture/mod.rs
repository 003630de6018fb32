mod media;
mod select;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use media::{ImageExtension, MediaError, MediaType};
pub use select::{extension, select_url};

/// Layout of dates in request parameters, upstream queries and file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's picture-of-the-day entry.
///
/// Decoded from the upstream metadata service and persisted (without `raw`)
/// in the `pictures` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    /// Standard-quality link. For videos this points at the video itself.
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "hdurl")]
    pub hd_url: Option<String>,
    /// Preview frame, only present for videos requested with `thumbs=true`.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub media_type: MediaType,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub explanation: String,
    /// Downloaded payload. Lives only between the byte fetch and the file write.
    #[serde(skip)]
    pub raw: Vec<u8>,
}

impl PictureRecord {
    /// File name the payload is stored under: `{date}.{ext}`.
    pub fn file_name(&self, ext: ImageExtension) -> String {
        format!("{}.{}", self.date.format(DATE_FORMAT), ext)
    }
}
