use tracing::warn;

use super::media::{ImageExtension, MediaError, MediaType};
use super::PictureRecord;

/// Pick the single URL a record's payload is downloaded from.
///
/// Images prefer the HD link and fall back to the standard one. Videos are
/// never downloaded, only their thumbnail.
pub fn select_url<'a>(record: &'a PictureRecord) -> Result<&'a str, MediaError> {
    let non_empty = |s: Option<&'a str>| -> Option<&'a str> { s.filter(|s| !s.is_empty()) };

    let picked = match record.media_type {
        MediaType::Image => non_empty(record.hd_url.as_deref())
            .or_else(|| non_empty(Some(record.url.as_str()))),
        MediaType::Video => non_empty(record.thumbnail_url.as_deref()),
        MediaType::Other(_) => None,
    };

    picked.ok_or_else(|| {
        warn!(
            date = %record.date,
            media_type = %record.media_type,
            "record has no downloadable url"
        );
        MediaError::NoValidUrl
    })
}

/// Derive the image extension from a URL or file name.
///
/// Only the segment after the last `.` is considered, so query strings or
/// fragments after the extension make the derivation fail.
pub fn extension(s: &str) -> Result<ImageExtension, MediaError> {
    if s.is_empty() {
        return Err(MediaError::NoExtension(String::new()));
    }

    match s.rsplit_once('.') {
        Some((_, last)) => last
            .parse()
            .map_err(|_| MediaError::NoExtension(s.to_string())),
        None => Err(MediaError::NoExtension(s.to_string())),
    }
}
