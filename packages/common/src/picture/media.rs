use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("no valid download url")]
    NoValidUrl,

    #[error("no file extension in {0:?}")]
    NoExtension(String),
}

/// Kind of payload a record links to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Image,
    Video,
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for MediaType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Other(s),
        }
    }
}

impl From<MediaType> for String {
    fn from(m: MediaType) -> Self {
        match m {
            MediaType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image formats the file store accepts and serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageExtension {
    Jpg,
    Jpeg,
    Png,
}

impl ImageExtension {
    pub const ALL: [ImageExtension; 3] = [Self::Jpg, Self::Jpeg, Self::Png];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    /// `Content-Type` the file is served with (`image/{ext}`).
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpg => "image/jpg",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl FromStr for ImageExtension {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ext| ext.as_str() == s)
            .ok_or_else(|| MediaError::NoExtension(s.to_string()))
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
