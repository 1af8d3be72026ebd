use common::config::Config;
use services::{WorkflowError, WorkflowResult};

/// Thin client for the external identity provider.
///
/// The provider owns credentials; this backend only asks it to revoke an
/// account when an admin deletes the corresponding user.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl IdentityClient {
    pub fn from_config() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Config::get().identity_api_url.clone(),
        }
    }

    /// Revokes the provider-side account for `email`.
    ///
    /// When no `IDENTITY_API_URL` is configured (development), the call is
    /// skipped with a warning rather than failing the deletion.
    pub async fn delete_account(&self, email: &str) -> WorkflowResult<()> {
        let Some(base) = &self.base_url else {
            tracing::warn!(email, "IDENTITY_API_URL not configured; skipping account revocation");
            return Ok(());
        };

        let url = format!("{}/accounts/{}", base.trim_end_matches('/'), email);
        let resp = self.client.delete(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, email, "identity provider request failed");
            WorkflowError::bad_request("Identity provider unreachable")
        })?;

        // 404 means the provider never knew the account; deletion still stands.
        if resp.status().is_success() || resp.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(())
        } else {
            tracing::error!(status = %resp.status(), email, "identity provider rejected revocation");
            Err(WorkflowError::bad_request(
                "Identity provider rejected the revocation",
            ))
        }
    }
}
