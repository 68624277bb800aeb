use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::plan::Plan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub plan: PlanState,
    pub quota: QuotaState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanState {
    pub id: String,
    pub activated: bool,
    pub requested_id: Option<String>,
    pub requested_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaState {
    /// Never negative; every delta is applied clamped at zero.
    pub images_remaining: i64,
    pub resets_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    pub fn new(
        uid: impl Into<String>,
        email: Option<String>,
        display_name: Option<String>,
        plan: &Plan,
        resets_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid: uid.into(),
            email,
            display_name,
            plan: PlanState {
                id: plan.id.to_string(),
                activated: true,
                requested_id: None,
                requested_at: None,
            },
            quota: QuotaState {
                images_remaining: plan.monthly_images,
                resets_at: Some(resets_at),
            },
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCreditsRequest {
    pub target_uid: String,
    pub delta_images: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetPlanRequest {
    pub target_uid: String,
    pub plan_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupUserRequest {
    pub target_uid: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub plan: PlanStateResponse,
    pub quota: QuotaStateResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanStateResponse {
    pub id: String,
    pub activated: bool,
    pub requested_id: Option<String>,
    pub requested_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStateResponse {
    pub images_remaining: i64,
    pub resets_at: Option<DateTime<Utc>>,
}

impl From<UserAccount> for AccountResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            uid: account.uid,
            email: account.email,
            display_name: account.display_name,
            plan: PlanStateResponse {
                id: account.plan.id,
                activated: account.plan.activated,
                requested_id: account.plan.requested_id,
                requested_at: account.plan.requested_at,
            },
            quota: QuotaStateResponse {
                images_remaining: account.quota.images_remaining,
                resets_at: account.quota.resets_at,
            },
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
