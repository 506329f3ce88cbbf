use super::UserId;

/// Caller identity taken from a verified bearer token.
///
/// Absence (`Option::None`) means the caller is anonymous, whether or not a
/// credential was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: UserId,
    /// Email embedded in the token when it was signed.
    pub email: String,
}

impl AuthenticatedIdentity {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
