use axum::{
    extract::State,
    http::{header, StatusCode},
    response::Response,
};

use crate::{
    errors::{AppError, Result},
    handlers::AppState,
};

pub async fn metrics(State(state): State<AppState>) -> Result<Response<String>> {
    let body = state.metrics.render()?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(body)
        .map_err(|e| AppError::Internal(e.into()))
}
