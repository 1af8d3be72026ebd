//! Workflow components for the EduStation backend.
//!
//! Each workflow owns a `DatabaseConnection` injected at construction and is
//! request-scoped in behavior: no state is held across invocations, and all
//! multi-record effects run inside a single transaction.

pub mod class_workflow;
pub mod enrollment;
pub mod error;
pub mod feedback;
pub mod grading;
pub mod teacher_workflow;
pub mod users;

pub use error::{WorkflowError, WorkflowResult};
