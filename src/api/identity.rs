use super::AppState;
use crate::domain::AuthenticatedIdentity;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Caller identity from the `Authorization` header; `None` for anonymous
/// callers and for credentials that fail verification.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<AuthenticatedIdentity>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        Ok(OptionalIdentity(state.identity.resolve_identity(header)))
    }
}
