pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

use chrono::{Duration, Utc};
use common::config::Config;
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::auth::claims::Claims;

/// Signs a bearer token for the given account. Used by the test routes and
/// integration tests; in production tokens come from the identity provider.
pub fn generate_token(sub: i64, email: &str) -> String {
    let config = Config::get();
    let exp = (Utc::now() + Duration::minutes(config.jwt_duration_minutes)).timestamp() as usize;
    let claims = Claims {
        sub,
        email: email.to_lowercase(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .expect("Failed to sign token")
}
