use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::{AppError, Result},
    handlers::AppState,
};

// RFC 5987 ext-value encoding for the attachment filename.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_');

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadParams {
    pub url: Option<String>,
    pub filename: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/download",
    params(DownloadParams),
    responses(
        (status = 200, description = "File bytes with an attachment disposition"),
        (status = 400, description = "Missing url parameter"),
        (status = 500, description = "Network failure while fetching the file"),
    ),
    tag = "download"
)]
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Result<Response> {
    let url = params
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("url query parameter is required".to_string()))?;

    let upstream = state
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to fetch {}: {}", url, e)))?;

    let status = upstream.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "upstream returned non-success status");
        let response = Response::builder()
            .status(status.as_u16())
            .body(Body::empty())
            .map_err(|e| AppError::Internal(e.into()))?;
        return Ok(response);
    }

    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    // Entire body held in memory before the response starts.
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to read body from {}: {}", url, e)))?;

    let filename = params
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or("download");
    let encoded = utf8_percent_encode(filename, FILENAME_ENCODE_SET);

    state.metrics.record_proxied_download();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename*=UTF-8''{}", encoded),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(response)
}
