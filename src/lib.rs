pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use handlers::AppState;

pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/admin/add-credits", post(handlers::admin::add_credits))
        .route("/admin/set-plan", post(handlers::admin::set_plan))
        .route("/admin/lookup-user", post(handlers::admin::lookup_user))
        .route("/user/bootstrap", post(handlers::user::bootstrap))
        .route("/chat/send", post(handlers::chat::send_message))
        .route("/download", get(handlers::download::download))
        .route("/storyboard/styles", get(handlers::styles::list_styles));

    Router::new()
        .nest("/api/v1", api)
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .route("/metrics", get(handlers::metrics::metrics))
        .merge(handlers::docs::create_docs_router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::metrics::track_metrics,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
