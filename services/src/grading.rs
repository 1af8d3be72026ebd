//! Assignments, submissions, and grading.

use chrono::{DateTime, Utc};
use db::models::{
    assignment::{self, Column as AssignmentColumn, Entity as AssignmentEntity},
    class::Entity as ClassEntity,
    enrollment,
    submission::{self, Column as SubmissionColumn, Entity as SubmissionEntity},
    user::Role,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use crate::error::{WorkflowError, WorkflowResult};

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub class_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: DateTime<Utc>,
}

pub struct GradingWorkflow {
    db: DatabaseConnection,
}

impl GradingWorkflow {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an assignment on a class the caller teaches.
    pub async fn create_assignment(
        &self,
        caller_email: &str,
        caller_role: Role,
        new: NewAssignment,
    ) -> WorkflowResult<assignment::Model> {
        let class = ClassEntity::find_by_id(new.class_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                WorkflowError::not_found(format!("Class {} not found", new.class_id))
            })?;

        if caller_role != Role::Admin && !class.teacher_email.eq_ignore_ascii_case(caller_email) {
            return Err(WorkflowError::forbidden(
                "Only the owning teacher may create assignments for this class",
            ));
        }

        Ok(assignment::ActiveModel {
            id: NotSet,
            class_id: Set(class.id),
            class_name: Set(class.name.clone()),
            title: Set(new.title),
            description: Set(new.description),
            deadline: Set(new.deadline),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn find_assignment(&self, assignment_id: i64) -> WorkflowResult<assignment::Model> {
        AssignmentEntity::find_by_id(assignment_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                WorkflowError::not_found(format!("Assignment {assignment_id} not found"))
            })
    }

    pub async fn list_assignments(&self, class_id: i64) -> WorkflowResult<Vec<assignment::Model>> {
        Ok(AssignmentEntity::find()
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await?)
    }

    /// Records a student's submission. The student must hold an enrollment in
    /// the assignment's class, and the deadline must not have passed.
    pub async fn submit(
        &self,
        assignment_id: i64,
        student_email: &str,
        content: String,
    ) -> WorkflowResult<submission::Model> {
        let student_email = student_email.to_lowercase();

        let target = AssignmentEntity::find_by_id(assignment_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                WorkflowError::not_found(format!("Assignment {assignment_id} not found"))
            })?;

        if !enrollment::Model::exists_for(&self.db, target.class_id, &student_email).await? {
            return Err(WorkflowError::forbidden(
                "Not enrolled in this assignment's class",
            ));
        }

        if Utc::now() > target.deadline {
            return Err(WorkflowError::conflict("assignment deadline has passed"));
        }

        Ok(submission::ActiveModel {
            id: NotSet,
            assignment_id: Set(target.id),
            class_id: Set(target.class_id),
            student_email: Set(student_email),
            content: Set(content),
            marks: Set(None),
            review: Set(None),
            viewed_hash: Set(None),
            submitted_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn list_by_assignment(
        &self,
        assignment_id: i64,
    ) -> WorkflowResult<Vec<submission::Model>> {
        Ok(SubmissionEntity::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(SubmissionColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_class(&self, class_id: i64) -> WorkflowResult<Vec<submission::Model>> {
        Ok(SubmissionEntity::find()
            .filter(SubmissionColumn::ClassId.eq(class_id))
            .order_by_asc(SubmissionColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_student(&self, email: &str) -> WorkflowResult<Vec<submission::Model>> {
        Ok(SubmissionEntity::find()
            .filter(SubmissionColumn::StudentEmail.eq(email.to_lowercase()))
            .order_by_asc(SubmissionColumn::Id)
            .all(&self.db)
            .await?)
    }

    /// Records marks and an optional review. Marks must be finite; NaN and
    /// infinity are never stored.
    pub async fn grade(
        &self,
        submission_id: i64,
        caller_email: &str,
        caller_role: Role,
        marks: f64,
        review: Option<String>,
    ) -> WorkflowResult<submission::Model> {
        if !marks.is_finite() {
            return Err(WorkflowError::bad_request("marks must be a finite number"));
        }

        let found = self.find_submission(submission_id).await?;
        self.require_class_teacher(found.class_id, caller_email, caller_role)
            .await?;

        let mut active = found.into_active_model();
        active.marks = Set(Some(marks));
        active.review = Set(review);
        Ok(active.update(&self.db).await?)
    }

    /// Idempotent view marker used by the frontend to track seen grades.
    pub async fn mark_viewed(
        &self,
        submission_id: i64,
        viewed_hash: String,
    ) -> WorkflowResult<submission::Model> {
        let found = self.find_submission(submission_id).await?;

        let mut active = found.into_active_model();
        active.viewed_hash = Set(Some(viewed_hash));
        Ok(active.update(&self.db).await?)
    }

    async fn find_submission(&self, submission_id: i64) -> WorkflowResult<submission::Model> {
        SubmissionEntity::find_by_id(submission_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                WorkflowError::not_found(format!("Submission {submission_id} not found"))
            })
    }

    async fn require_class_teacher(
        &self,
        class_id: i64,
        caller_email: &str,
        caller_role: Role,
    ) -> WorkflowResult<()> {
        if caller_role == Role::Admin {
            return Ok(());
        }
        let class = ClassEntity::find_by_id(class_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found(format!("Class {class_id} not found")))?;

        if class.teacher_email.eq_ignore_ascii_case(caller_email) {
            Ok(())
        } else {
            Err(WorkflowError::forbidden(
                "Only the class teacher may grade submissions",
            ))
        }
    }
}
