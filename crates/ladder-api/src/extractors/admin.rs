//! Admin token extractor
//!
//! Guards the sync control surface with a static bearer token.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::response::ApiError;
use crate::state::AppState;

/// Marker for a request carrying the configured admin token
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // No token configured: nobody gets in
        let Some(expected) = app_state.admin_token() else {
            return Err(ApiError::AdminDisabled);
        };

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        if !constant_time_eq(bearer.token().as_bytes(), expected.as_bytes()) {
            tracing::warn!("Rejected control surface request with invalid admin token");
            return Err(ApiError::InvalidToken);
        }

        Ok(AdminAuth)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
