//! Student feedback on assignments, gated on enrollment.

use chrono::Utc;
use db::models::{
    enrollment,
    feedback::{self, Column as FeedbackColumn, Entity as FeedbackEntity},
    user::Role,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use crate::error::{is_unique_violation, WorkflowError, WorkflowResult};

pub struct FeedbackWorkflow {
    db: DatabaseConnection,
}

impl FeedbackWorkflow {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates feedback. The author must hold an enrollment in the class, and
    /// only one feedback may exist per (class, student, assignment title).
    pub async fn create(
        &self,
        class_id: i64,
        student_email: &str,
        assignment_title: String,
        text: String,
        rating: f64,
    ) -> WorkflowResult<feedback::Model> {
        if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
            return Err(WorkflowError::bad_request("rating must be between 0 and 5"));
        }
        let student_email = student_email.to_lowercase();

        if !enrollment::Model::exists_for(&self.db, class_id, &student_email).await? {
            return Err(WorkflowError::forbidden(
                "Feedback requires an enrollment in this class",
            ));
        }

        let now = Utc::now();
        feedback::ActiveModel {
            id: NotSet,
            class_id: Set(class_id),
            student_email: Set(student_email),
            assignment_title: Set(assignment_title),
            feedback: Set(text),
            rating: Set(rating),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                WorkflowError::conflict("feedback already submitted for this assignment")
            } else {
                e.into()
            }
        })
    }

    pub async fn list_by_class(&self, class_id: i64) -> WorkflowResult<Vec<feedback::Model>> {
        Ok(FeedbackEntity::find()
            .filter(FeedbackColumn::ClassId.eq(class_id))
            .order_by_asc(FeedbackColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn update(
        &self,
        feedback_id: i64,
        caller_email: &str,
        caller_role: Role,
        text: Option<String>,
        rating: Option<f64>,
    ) -> WorkflowResult<feedback::Model> {
        if let Some(r) = rating {
            if !r.is_finite() || !(0.0..=5.0).contains(&r) {
                return Err(WorkflowError::bad_request("rating must be between 0 and 5"));
            }
        }

        let found = self.find_owned(feedback_id, caller_email, caller_role).await?;

        let mut active = found.into_active_model();
        if let Some(text) = text {
            active.feedback = Set(text);
        }
        if let Some(rating) = rating {
            active.rating = Set(rating);
        }
        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(
        &self,
        feedback_id: i64,
        caller_email: &str,
        caller_role: Role,
    ) -> WorkflowResult<()> {
        self.find_owned(feedback_id, caller_email, caller_role).await?;
        FeedbackEntity::delete_by_id(feedback_id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn find_owned(
        &self,
        feedback_id: i64,
        caller_email: &str,
        caller_role: Role,
    ) -> WorkflowResult<feedback::Model> {
        let found = FeedbackEntity::find_by_id(feedback_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Feedback not found"))?;

        if caller_role != Role::Admin && !found.student_email.eq_ignore_ascii_case(caller_email) {
            return Err(WorkflowError::forbidden(
                "Only the author or an admin may modify this feedback",
            ));
        }
        Ok(found)
    }
}
