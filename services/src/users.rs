//! Account registration and role administration.

use chrono::Utc;
use db::models::user::{self, Column as UserColumn, Entity as UserEntity, Role};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use crate::error::{is_unique_violation, WorkflowError, WorkflowResult};

pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Idempotent registration keyed on the lowercased email.
    ///
    /// Returns the stored user plus `already_exists`; a repeat call never
    /// mutates the stored role. New registrations start as `student`.
    pub async fn register(
        &self,
        email: &str,
        name: Option<String>,
    ) -> WorkflowResult<(user::Model, bool)> {
        let email = email.to_lowercase();

        if let Some(existing) = user::Model::find_by_email(&self.db, &email).await? {
            return Ok((existing, true));
        }

        let insert = user::ActiveModel {
            id: NotSet,
            email: Set(email.clone()),
            name: Set(name),
            role: Set(Role::Student),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;

        match insert {
            Ok(created) => Ok((created, false)),
            // Lost a registration race; the row inserted by the winner is the
            // record the caller asked for.
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(email, "registration race, returning existing user");
                let existing = user::Model::find_by_email(&self.db, &email)
                    .await?
                    .ok_or_else(|| WorkflowError::not_found("User not found"))?;
                Ok((existing, true))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> WorkflowResult<Vec<user::Model>> {
        Ok(UserEntity::find()
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn role_for_email(&self, email: &str) -> WorkflowResult<Role> {
        Ok(user::Model::role_for_email(&self.db, email).await?)
    }

    pub async fn make_admin(&self, id: i64) -> WorkflowResult<user::Model> {
        let found = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found(format!("User {id} not found")))?;

        let mut active = found.into_active_model();
        active.role = Set(Role::Admin);
        Ok(active.update(&self.db).await?)
    }

    /// Removes the account row and returns it so the caller can revoke the
    /// identity-provider account as well.
    pub async fn delete(&self, id: i64) -> WorkflowResult<user::Model> {
        let found = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found(format!("User {id} not found")))?;

        UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(found)
    }
}
