//! Caller identity from bearer credentials.
//!
//! Resolution never fails loudly: a missing, malformed, expired or forged
//! credential all resolve to an anonymous caller.

use crate::domain::{AuthenticatedIdentity, UserId};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Payload signed into session tokens at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub email: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Checks a token's signature and expiry and returns its claims.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// HS256 JWT verifier over a shared secret.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        Ok(decode::<TokenClaims>(token, &self.key, &self.validation)?.claims)
    }
}

/// Pull the token out of an `Authorization` value shaped `"<scheme> <token>"`.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let mut parts = header?.split_whitespace();
    let _scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(token)
}

#[derive(Clone)]
pub struct IdentityResolver {
    verifier: Arc<dyn TokenVerifier>,
}

impl IdentityResolver {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    pub fn from_secret(secret: &str) -> Self {
        Self::new(Arc::new(JwtVerifier::new(secret)))
    }

    /// Identity carried by the `Authorization` header, if it verifies.
    pub fn resolve_identity(&self, header: Option<&str>) -> Option<AuthenticatedIdentity> {
        let token = extract_bearer(header)?;
        match self.verifier.verify(token) {
            Ok(claims) => Some(AuthenticatedIdentity::new(
                UserId::new(claims.id),
                claims.email,
            )),
            Err(e) => {
                debug!("Treating caller as anonymous: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    fn sign(secret: &str, id: i64, email: &str, exp: u64) -> String {
        let claims = TokenClaims {
            id,
            email: email.to_string(),
            exp,
            iat: Some(now()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer(Some("Token abc")), Some("abc"));
        assert_eq!(extract_bearer(Some("Bearer")), None);
        assert_eq!(extract_bearer(Some("Bearer a b")), None);
        assert_eq!(extract_bearer(Some("")), None);
        assert_eq!(extract_bearer(None), None);
    }

    #[test]
    fn test_valid_token_resolves_identity() {
        let resolver = IdentityResolver::from_secret(SECRET);
        let token = sign(SECRET, 42, "fan@example.com", now() + 3600);
        let header = format!("Bearer {}", token);

        let identity = resolver.resolve_identity(Some(&header)).unwrap();
        assert_eq!(identity.user_id, UserId::new(42));
        assert_eq!(identity.email, "fan@example.com");
    }

    #[test]
    fn test_wrong_secret_is_anonymous() {
        let resolver = IdentityResolver::from_secret(SECRET);
        let token = sign("other-secret", 42, "fan@example.com", now() + 3600);
        assert_eq!(resolver.resolve_identity(Some(&format!("Bearer {}", token))), None);
    }

    #[test]
    fn test_expired_token_is_anonymous() {
        let resolver = IdentityResolver::from_secret(SECRET);
        let token = sign(SECRET, 42, "fan@example.com", now() - 3600);
        assert_eq!(resolver.resolve_identity(Some(&format!("Bearer {}", token))), None);
    }

    #[test]
    fn test_garbage_token_is_anonymous() {
        let resolver = IdentityResolver::from_secret(SECRET);
        assert_eq!(resolver.resolve_identity(Some("Bearer not-a-jwt")), None);
        assert_eq!(resolver.resolve_identity(None), None);
    }
}
