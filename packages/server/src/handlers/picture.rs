use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::models::picture::{PictureLinksResponse, StorageParams, StoredParams};
use crate::service::StoredFilter;
use crate::state::AppState;

/// Fetch and store today's picture.
#[utoipa::path(
    get,
    path = "/picday",
    tag = "Pictures",
    operation_id = "todaysPicture",
    summary = "Fetch today's picture of the day",
    description = "Downloads today's picture from the upstream service, records its metadata \
        and saves the image on disk. Repeated calls on the same day return the stored URL \
        without fetching again.",
    responses(
        (status = 200, description = "Picture stored (message is `successfully downloaded` or `already stored`)", body = PictureLinksResponse),
        (status = 409, description = "Picture stored concurrently (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Store or disk failure (INTERNAL_ERROR)", body = ErrorBody),
        (status = 502, description = "Upstream failure (UPSTREAM_ERROR)", body = ErrorBody),
        (status = 504, description = "Deadline exceeded (TIMEOUT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn todays_picture(
    State(state): State<AppState>,
) -> Result<Json<PictureLinksResponse>, AppError> {
    let today = Utc::now().date_naive();
    let outcome = state.pictures.fetch_today(today).await?;

    info!(%today, outcome = outcome.message(), "Today's picture handled");

    Ok(Json(outcome.into()))
}

/// List download links of stored pictures.
#[utoipa::path(
    get,
    path = "/stored",
    tag = "Pictures",
    operation_id = "listStoredPictures",
    summary = "List stored pictures",
    description = "Returns download links for the pictures stored on one day or in an \
        inclusive date range. Pass either `date` or both `start_date` and `end_date`.",
    params(StoredParams),
    responses(
        (status = 200, description = "Download links", body = PictureLinksResponse),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Nothing stored for the date (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_stored(
    State(state): State<AppState>,
    Query(params): Query<StoredParams>,
) -> Result<Json<PictureLinksResponse>, AppError> {
    let filter = StoredFilter::from_params(
        params.date.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let urls = state.pictures.list_stored(filter).await?;

    Ok(Json(PictureLinksResponse {
        message: "ok".into(),
        urls,
    }))
}

/// Serve a stored picture.
#[utoipa::path(
    get,
    path = "/storage",
    tag = "Pictures",
    operation_id = "downloadPicture",
    summary = "Download a stored picture",
    description = "Streams the raw bytes of a stored `{date}.{ext}` file with an \
        `image/{ext}` content type. Only `jpg`, `jpeg` and `png` names are accepted.",
    params(StorageParams),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 400, description = "Invalid file name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn serve_file(
    State(state): State<AppState>,
    Query(params): Query<StorageParams>,
) -> Result<impl IntoResponse, AppError> {
    let name = params
        .name
        .ok_or_else(|| AppError::Validation("Missing 'name' parameter".into()))?;

    let (content, ext) = state.pictures.read_file(&name).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, ext.content_type())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}
