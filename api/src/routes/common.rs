//! Helpers shared across route groups.

use db::models::user::{self, Role};
use services::WorkflowError;

use crate::auth::claims::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Resolves the caller's stored role. A missing row is `Role::User`.
pub async fn stored_role(state: &AppState, user: &AuthUser) -> ApiResult<Role> {
    Ok(user::Model::role_for_email(state.db(), user.email())
        .await
        .map_err(WorkflowError::from)?)
}

/// Requires an exact stored role. The role set is flat, so `Admin` does not
/// satisfy a `Teacher` requirement.
pub async fn require_role(state: &AppState, user: &AuthUser, required: Role) -> ApiResult<()> {
    if stored_role(state, user).await? == required {
        Ok(())
    } else {
        Err(WorkflowError::forbidden(format!("{required} access required")).into())
    }
}

/// Rejects callers asking about someone else's records unless they are admin.
pub fn require_self_or_admin(caller: &AuthUser, role: Role, email: &str) -> ApiResult<()> {
    if role == Role::Admin || caller.email().eq_ignore_ascii_case(email) {
        Ok(())
    } else {
        Err(WorkflowError::forbidden("You may only access your own records").into())
    }
}
