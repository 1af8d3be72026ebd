use serde::{Deserialize, Serialize};

/// Token payload shared with the identity provider.
///
/// `sub` is the provider-side account id; `email` is the marketplace key.
/// Roles are deliberately absent: they are re-read from storage on every
/// privileged decision, so a stale token can never smuggle a revoked role.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }
}
