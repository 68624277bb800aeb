use axum::{extract::State, response::Json};

use crate::{handlers::AppState, models::StylesResponse};

#[utoipa::path(
    get,
    path = "/api/v1/storyboard/styles",
    responses(
        (status = 200, description = "Active presets, or the built-in catalog on store failure", body = StylesResponse),
    ),
    tag = "storyboard"
)]
pub async fn list_styles(State(state): State<AppState>) -> Json<StylesResponse> {
    Json(StylesResponse {
        styles: state.styles.list().await,
    })
}
