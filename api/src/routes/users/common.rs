use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 200, message = "name must be at most 200 characters"))]
    pub name: Option<String>,
}

/// Registration response: the stored record plus whether it already existed.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    #[serde(flatten)]
    pub user: db::models::user::Model,
    pub already_exists: bool,
}
