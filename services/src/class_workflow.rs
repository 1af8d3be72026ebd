//! Class lifecycle: `pending -> {approved, rejected}`, and any edit forces a
//! class back to `pending` for re-review.

use chrono::Utc;
use db::models::class::{self, Column as ClassColumn, Entity as ClassEntity, Status};
use db::models::user::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use crate::error::{WorkflowError, WorkflowResult};

#[derive(Debug, Clone)]
pub struct NewClass {
    pub teacher_email: String,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
    pub seats: i64,
    pub description: Option<String>,
    pub category: String,
}

/// Field updates for `edit`; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct ClassEdit {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub seats: Option<i64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

pub struct ClassWorkflow {
    db: DatabaseConnection,
}

impl ClassWorkflow {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a class. Status is always initialized to `pending`, whatever
    /// the caller supplied upstream.
    pub async fn create(&self, new: NewClass) -> WorkflowResult<class::Model> {
        if new.seats < 0 {
            return Err(WorkflowError::bad_request("seats must not be negative"));
        }
        if !new.price.is_finite() || new.price < 0.0 {
            return Err(WorkflowError::bad_request("price must be a non-negative number"));
        }

        let now = Utc::now();
        Ok(class::ActiveModel {
            id: NotSet,
            teacher_email: Set(new.teacher_email.to_lowercase()),
            name: Set(new.name),
            image: Set(new.image),
            price: Set(new.price),
            seats: Set(new.seats),
            enrolled: Set(0),
            description: Set(new.description),
            category: Set(new.category),
            status: Set(Status::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn get(&self, class_id: i64) -> WorkflowResult<class::Model> {
        ClassEntity::find_by_id(class_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found(format!("Class {class_id} not found")))
    }

    /// Fetch honoring visibility: non-approved classes exist only for the
    /// owning teacher and admins; everyone else gets NotFound, not Forbidden,
    /// so the class's existence is not leaked.
    pub async fn get_visible(
        &self,
        class_id: i64,
        caller_email: Option<&str>,
        caller_role: Option<Role>,
    ) -> WorkflowResult<class::Model> {
        let found = self.get(class_id).await?;
        if found.status == Status::Approved {
            return Ok(found);
        }

        let is_admin = caller_role == Some(Role::Admin);
        let is_owner = caller_email
            .map(|e| e.eq_ignore_ascii_case(&found.teacher_email))
            .unwrap_or(false);
        if is_admin || is_owner {
            Ok(found)
        } else {
            Err(WorkflowError::not_found(format!(
                "Class {class_id} not found"
            )))
        }
    }

    /// Public catalog: approved classes only.
    pub async fn list_public(&self) -> WorkflowResult<Vec<class::Model>> {
        Ok(ClassEntity::find()
            .filter(ClassColumn::Status.eq(Status::Approved))
            .order_by_asc(ClassColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_all(&self) -> WorkflowResult<Vec<class::Model>> {
        Ok(ClassEntity::find()
            .order_by_asc(ClassColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_teacher(&self, email: &str) -> WorkflowResult<Vec<class::Model>> {
        Ok(ClassEntity::find()
            .filter(ClassColumn::TeacherEmail.eq(email.to_lowercase()))
            .order_by_asc(ClassColumn::Id)
            .all(&self.db)
            .await?)
    }

    /// Applies field updates and forces the class back to `pending`.
    /// Owner-or-admin only.
    pub async fn edit(
        &self,
        class_id: i64,
        caller_email: &str,
        caller_role: Role,
        edit: ClassEdit,
    ) -> WorkflowResult<class::Model> {
        let found = self.get(class_id).await?;
        self.require_owner_or_admin(&found, caller_email, caller_role)?;

        if let Some(seats) = edit.seats {
            if seats < 0 {
                return Err(WorkflowError::bad_request("seats must not be negative"));
            }
        }
        if let Some(price) = edit.price {
            if !price.is_finite() || price < 0.0 {
                return Err(WorkflowError::bad_request("price must be a non-negative number"));
            }
        }

        let mut active = found.into_active_model();
        if let Some(name) = edit.name {
            active.name = Set(name);
        }
        if let Some(image) = edit.image {
            active.image = Set(Some(image));
        }
        if let Some(price) = edit.price {
            active.price = Set(price);
        }
        if let Some(seats) = edit.seats {
            active.seats = Set(seats);
        }
        if let Some(description) = edit.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = edit.category {
            active.category = Set(category);
        }
        active.status = Set(Status::Pending);
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn approve(&self, class_id: i64) -> WorkflowResult<class::Model> {
        self.transition(class_id, Status::Approved).await
    }

    pub async fn reject(&self, class_id: i64) -> WorkflowResult<class::Model> {
        self.transition(class_id, Status::Rejected).await
    }

    pub async fn delete(
        &self,
        class_id: i64,
        caller_email: &str,
        caller_role: Role,
    ) -> WorkflowResult<()> {
        let found = self.get(class_id).await?;
        self.require_owner_or_admin(&found, caller_email, caller_role)?;

        ClassEntity::delete_by_id(class_id).exec(&self.db).await?;
        Ok(())
    }

    async fn transition(&self, class_id: i64, status: Status) -> WorkflowResult<class::Model> {
        let found = self.get(class_id).await?;
        let mut active = found.into_active_model();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    fn require_owner_or_admin(
        &self,
        class: &class::Model,
        caller_email: &str,
        caller_role: Role,
    ) -> WorkflowResult<()> {
        if caller_role == Role::Admin || class.teacher_email.eq_ignore_ascii_case(caller_email) {
            Ok(())
        } else {
            Err(WorkflowError::forbidden(
                "Only the owning teacher or an admin may modify this class",
            ))
        }
    }
}
