use sea_orm::DatabaseConnection;
use services::{
    class_workflow::ClassWorkflow, enrollment::EnrollmentLedger, feedback::FeedbackWorkflow,
    grading::GradingWorkflow, teacher_workflow::TeacherWorkflow, users::UserService,
};

use crate::services::{identity::IdentityClient, payments::PaymentGateway};

/// Shared application state: the database handle plus clients for the two
/// external collaborators. Workflows are constructed per use; they only wrap
/// the (cheaply cloneable) connection.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    identity: IdentityClient,
    payments: PaymentGateway,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            identity: IdentityClient::from_config(),
            payments: PaymentGateway::from_config(),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn identity(&self) -> &IdentityClient {
        &self.identity
    }

    pub fn payments(&self) -> &PaymentGateway {
        &self.payments
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.db.clone())
    }

    pub fn teacher_workflow(&self) -> TeacherWorkflow {
        TeacherWorkflow::new(self.db.clone())
    }

    pub fn classes(&self) -> ClassWorkflow {
        ClassWorkflow::new(self.db.clone())
    }

    pub fn enrollments(&self) -> EnrollmentLedger {
        EnrollmentLedger::new(self.db.clone())
    }

    pub fn grading(&self) -> GradingWorkflow {
        GradingWorkflow::new(self.db.clone())
    }

    pub fn feedbacks(&self) -> FeedbackWorkflow {
        FeedbackWorkflow::new(self.db.clone())
    }
}
