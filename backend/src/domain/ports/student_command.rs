//! Driving port for student write operations.
//!
//! Inbound adapters call this port; each method validates first and then
//! performs exactly one store write.

use async_trait::async_trait;

use crate::domain::{EnrollmentError, StudentDraft, StudentId, StudentView};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentCommand: Send + Sync {
    /// Register a new student after checking email uniqueness and course
    /// references. Returns the stored record with resolved courses.
    async fn create(&self, draft: StudentDraft) -> Result<StudentView, EnrollmentError>;

    /// Replace every field of an existing student.
    async fn update(
        &self,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<StudentView, EnrollmentError>;

    /// Remove a student, failing with `NotFound` if it does not exist.
    async fn delete(&self, id: StudentId) -> Result<(), EnrollmentError>;
}
