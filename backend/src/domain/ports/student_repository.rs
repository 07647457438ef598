//! Port abstraction for student persistence adapters and their errors.
//!
//! Every mutating method is a single durable write. Adapters enforce email
//! uniqueness themselves and report violations as
//! [`StudentRepositoryError::DuplicateEmail`], which the domain treats the
//! same as its own pre-check.

use async_trait::async_trait;

use crate::domain::{Student, StudentDraft, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
        /// The email unique constraint rejected the write.
        DuplicateEmail { email: String } => "student email already registered: {email}",
        /// The targeted row disappeared before the write.
        NotFound { id: StudentId } => "student {id} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students ordered by identifier.
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError>;

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;

    /// Insert a new student with its enrollments and return the stored record.
    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError>;

    /// Overwrite a student's fields and replace its enrollment set.
    async fn update(&self, student: &Student) -> Result<Student, StudentRepositoryError>;

    /// Remove a student and its enrollments.
    async fn delete(&self, id: StudentId) -> Result<(), StudentRepositoryError>;
}
