use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::admin::add_credits,
        crate::handlers::admin::set_plan,
        crate::handlers::admin::lookup_user,
        crate::handlers::user::bootstrap,
        crate::handlers::chat::send_message,
        crate::handlers::download::download,
        crate::handlers::styles::list_styles,
        crate::handlers::health::liveness,
        crate::handlers::health::readiness,
    ),
    components(
        schemas(
            crate::models::AddCreditsRequest,
            crate::models::SetPlanRequest,
            crate::models::LookupUserRequest,
            crate::models::SendMessageRequest,
            crate::models::AccountResponse,
            crate::models::PlanStateResponse,
            crate::models::QuotaStateResponse,
            crate::models::PresetStyle,
            crate::models::StylesResponse,
        )
    ),
    tags(
        (name = "admin", description = "Entitlement administration"),
        (name = "user", description = "Account bootstrap"),
        (name = "chat", description = "Chat relay"),
        (name = "download", description = "Asset download proxy"),
        (name = "storyboard", description = "Preset style catalog"),
        (name = "health", description = "Health checks")
    ),
    info(
        title = "YesGem Studio API",
        version = "1.0.0",
        description = "Entitlements, presets, chat relay, and asset proxying for YesGem Studio"
    )
)]
pub struct ApiDoc;

pub fn create_docs_router() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
