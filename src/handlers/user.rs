use axum::{extract::State, response::Json};
use serde_json::json;

use crate::{errors::Result, handlers::AppState, middleware::auth::AuthenticatedUser};

#[utoipa::path(
    post,
    path = "/api/v1/user/bootstrap",
    responses(
        (status = 200, description = "Account exists after the call; creation happens only once"),
        (status = 401, description = "No valid bearer token"),
    ),
    tag = "user"
)]
pub async fn bootstrap(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    state
        .ledger
        .ensure_account(&user.uid, user.email.clone(), user.display_name.clone())
        .await?;
    state.metrics.record_account_bootstrapped();

    tracing::debug!(uid = %user.uid, "bootstrap ensured account");

    Ok(Json(json!({ "ok": true })))
}
