use axum::{extract::State, response::Json};
use serde_json::json;

use crate::{
    errors::{AppError, Result},
    handlers::AppState,
    middleware::auth::AdminUser,
    models::{AccountResponse, AddCreditsRequest, LookupUserRequest, SetPlanRequest},
};

// Admin bodies are validated by hand so that every malformed field comes
// back as 400, not the 422 axum's typed Json rejection produces.
fn required_str<'a>(body: &'a serde_json::Value, field: &str) -> Result<&'a str> {
    body.get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/add-credits",
    request_body = AddCreditsRequest,
    responses(
        (status = 200, description = "Credits adjusted, clamped at zero"),
        (status = 400, description = "Missing or malformed fields"),
        (status = 401, description = "No valid bearer token"),
        (status = 403, description = "Caller lacks the admin capability"),
        (status = 404, description = "Target account does not exist"),
    ),
    tag = "admin"
)]
pub async fn add_credits(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>> {
    let target_uid = required_str(&body, "targetUid")?;
    let delta_images = body
        .get("deltaImages")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AppError::Validation("deltaImages must be an integer".to_string()))?;

    let account = state.ledger.adjust_credits(target_uid, delta_images).await?;
    state.metrics.record_credit_adjustment();

    tracing::info!(
        admin = %admin.uid,
        uid = %target_uid,
        delta = delta_images,
        remaining = account.quota.images_remaining,
        "adjusted image credits"
    );

    Ok(Json(json!({ "ok": true })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/set-plan",
    request_body = SetPlanRequest,
    responses(
        (status = 200, description = "Plan assigned, quota reset to the plan allotment"),
        (status = 400, description = "Missing fields or unknown plan id"),
        (status = 401, description = "No valid bearer token"),
        (status = 403, description = "Caller lacks the admin capability"),
    ),
    tag = "admin"
)]
pub async fn set_plan(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>> {
    let target_uid = required_str(&body, "targetUid")?;
    let plan_id = required_str(&body, "planId")?;

    let account = state.ledger.set_plan(target_uid, plan_id).await?;
    state.metrics.record_plan_assignment();

    tracing::info!(
        admin = %admin.uid,
        uid = %target_uid,
        plan = %account.plan.id,
        images = account.quota.images_remaining,
        "assigned plan"
    );

    Ok(Json(json!({ "ok": true })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/lookup-user",
    request_body = LookupUserRequest,
    responses(
        (status = 200, description = "Account projection", body = AccountResponse),
        (status = 400, description = "Missing targetUid"),
        (status = 401, description = "No valid bearer token"),
        (status = 403, description = "Caller lacks the admin capability"),
        (status = 404, description = "Account does not exist"),
    ),
    tag = "admin"
)]
pub async fn lookup_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<AccountResponse>> {
    let target_uid = required_str(&body, "targetUid")?;

    let account = state.ledger.lookup(target_uid).await?;

    Ok(Json(AccountResponse::from(account)))
}
