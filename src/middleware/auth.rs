use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{auth::TokenVerifier, errors::AppError, handlers::AppState};

/// What a verified identity is allowed to do. Admin standing comes from the
/// configured privileged uid set or an `admin` claim in the token, so new
/// privileged identities need no code change.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub is_admin: bool,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub capabilities: Capabilities,
}

/// Extractor form of the admin authorization gate: verified bearer identity
/// carrying the admin capability, or 401/403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Auth("Authentication required".to_string()))?;

        let verifier = TokenVerifier::new(&state.config.jwt_secret);
        let claims = verifier.verify(token)?;

        let is_admin = claims.admin || state.config.is_admin_uid(&claims.sub);
        let permissions = if is_admin {
            vec![
                "entitlements:write".to_string(),
                "accounts:read".to_string(),
            ]
        } else {
            Vec::new()
        };

        Ok(AuthenticatedUser {
            uid: claims.sub,
            email: claims.email,
            display_name: claims.name,
            capabilities: Capabilities {
                is_admin,
                permissions,
            },
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.capabilities.is_admin {
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser(user))
    }
}
