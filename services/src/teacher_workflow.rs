//! Teacher application state machine.
//!
//! `pending -> {accepted, rejected}`, `rejected -> pending` (reapply). An
//! accepted request is deleted once materialized into the `teachers` roster,
//! so "accepted" never rests in the table.

use chrono::Utc;
use db::models::{
    teacher::{self, Entity as TeacherEntity},
    teacher_request::{self, Column as RequestColumn, Entity as RequestEntity, Status},
    user::{self, Role},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::error::{WorkflowError, WorkflowResult};

/// Profile fields carried from a request into the teacher roster.
#[derive(Debug, Clone)]
pub struct TeacherProfile {
    pub name: String,
    pub image: Option<String>,
    pub title: String,
    pub category: String,
    pub experience: String,
}

pub struct TeacherWorkflow {
    db: DatabaseConnection,
}

impl TeacherWorkflow {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new application. At most one live request may exist per email.
    pub async fn submit(
        &self,
        email: &str,
        profile: TeacherProfile,
    ) -> WorkflowResult<teacher_request::Model> {
        let email = email.to_lowercase();

        if let Some(existing) = teacher_request::Model::find_by_email(&self.db, &email).await? {
            let msg = match existing.status {
                Status::Pending => "A teacher request is already pending for this email",
                Status::Rejected => "A rejected request exists for this email; reapply instead",
                Status::Accepted => "A request for this email has already been processed",
            };
            return Err(WorkflowError::conflict(msg));
        }

        let now = Utc::now();
        Ok(teacher_request::ActiveModel {
            id: NotSet,
            email: Set(email),
            name: Set(profile.name),
            image: Set(profile.image),
            title: Set(profile.title),
            category: Set(profile.category),
            experience: Set(profile.experience),
            status: Set(Status::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?)
    }

    /// Requests awaiting a decision, plus rejected ones eligible for reapply.
    pub async fn list_open(&self) -> WorkflowResult<Vec<teacher_request::Model>> {
        Ok(RequestEntity::find()
            .filter(RequestColumn::Status.is_in([Status::Pending, Status::Rejected]))
            .order_by_asc(RequestColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> WorkflowResult<Option<teacher_request::Model>> {
        Ok(teacher_request::Model::find_by_email(&self.db, email).await?)
    }

    /// Approves a request: promotes the user, materializes the roster row,
    /// and deletes the request. All three effects run in one transaction so
    /// a failure partway leaves no observable change.
    pub async fn approve(&self, request_id: i64) -> WorkflowResult<teacher::Model> {
        let txn = self.db.begin().await?;

        let request = RequestEntity::find_by_id(request_id)
            .one(&txn)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Request not found"))?;

        let user = user::Model::find_by_email(&txn, &request.email)
            .await?
            .ok_or_else(|| WorkflowError::not_found("No user account for request email"))?;

        let mut user_active = user.into_active_model();
        user_active.role = Set(Role::Teacher);
        user_active.update(&txn).await?;

        let roster_row = match teacher::Model::find_by_email(&txn, &request.email).await? {
            Some(existing) => existing,
            None => {
                teacher::ActiveModel {
                    id: NotSet,
                    name: Set(request.name.clone()),
                    email: Set(request.email.clone()),
                    image: Set(request.image.clone()),
                    title: Set(request.title.clone()),
                    category: Set(request.category.clone()),
                    experience: Set(request.experience.clone()),
                    role: Set("teacher".into()),
                    joined_at: Set(Utc::now()),
                }
                .insert(&txn)
                .await?
            }
        };

        RequestEntity::delete_by_id(request_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(roster_row)
    }

    /// Marks a request rejected. The user's role is untouched.
    pub async fn reject(&self, request_id: i64) -> WorkflowResult<teacher_request::Model> {
        let request = RequestEntity::find_by_id(request_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Request not found"))?;

        let mut active = request.into_active_model();
        active.status = Set(Status::Rejected);
        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    /// Moves a rejected request back to pending. The conditional update only
    /// matches `status = rejected`, so any other state conflicts.
    pub async fn reapply(&self, email: &str) -> WorkflowResult<()> {
        let res = RequestEntity::update_many()
            .col_expr(RequestColumn::Status, Expr::value(Status::Pending))
            .col_expr(RequestColumn::UpdatedAt, Expr::value(Utc::now()))
            .filter(RequestColumn::Email.eq(email.to_lowercase()))
            .filter(RequestColumn::Status.eq(Status::Rejected))
            .exec(&self.db)
            .await?;

        if res.rows_affected == 0 {
            return Err(WorkflowError::conflict(
                "Only a rejected request can be reapplied",
            ));
        }
        Ok(())
    }

    pub async fn roster(&self) -> WorkflowResult<Vec<teacher::Model>> {
        Ok(TeacherEntity::find()
            .order_by_asc(db::models::teacher::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Removes a teacher from the roster and reverts the owning user to
    /// `student`, as one unit.
    pub async fn deactivate(&self, teacher_id: i64) -> WorkflowResult<()> {
        let txn = self.db.begin().await?;

        let roster_row = TeacherEntity::find_by_id(teacher_id)
            .one(&txn)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Teacher not found"))?;

        if let Some(user) = user::Model::find_by_email(&txn, &roster_row.email).await? {
            let mut active = user.into_active_model();
            active.role = Set(Role::Student);
            active.update(&txn).await?;
        }

        TeacherEntity::delete_by_id(teacher_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
