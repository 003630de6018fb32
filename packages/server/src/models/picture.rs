use serde::{Deserialize, Serialize};

use crate::service::FetchOutcome;

/// Query parameters for listing stored pictures.
///
/// Either `date` alone or both `start_date` and `end_date`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct StoredParams {
    /// Single day to look up.
    #[param(example = "2022-01-01")]
    pub date: Option<String>,
    /// First day of the range (inclusive).
    #[param(example = "2022-01-01")]
    pub start_date: Option<String>,
    /// Last day of the range (inclusive).
    #[param(example = "2022-02-01")]
    pub end_date: Option<String>,
}

/// Query parameters for downloading a stored picture.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct StorageParams {
    /// Stored file name, `{date}.{ext}`.
    #[param(example = "2022-01-01.jpg")]
    pub name: Option<String>,
}

/// Envelope shared by the picture endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PictureLinksResponse {
    #[schema(example = "successfully downloaded")]
    pub message: String,
    #[schema(example = json!(["https://apod.nasa.gov/apod/image/2201/MoonstripsAnnotatedIG.jpg"]))]
    pub urls: Vec<String>,
}

impl From<FetchOutcome> for PictureLinksResponse {
    fn from(outcome: FetchOutcome) -> Self {
        Self {
            message: outcome.message().to_string(),
            urls: vec![outcome.url().to_string()],
        }
    }
}
