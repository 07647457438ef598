//! Port abstraction for course persistence adapters.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
        /// The title unique constraint rejected the write.
        DuplicateTitle { title: String } => "course title already exists: {title}",
        /// The targeted row does not exist.
        NotFound { id: CourseId } => "course {id} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses ordered by identifier.
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Courses whose identifiers appear in `ids`; unknown ids are skipped.
    async fn find_by_ids(
        &self,
        ids: &BTreeSet<CourseId>,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError>;

    /// Replace title and description, failing with `NotFound` when absent.
    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, CourseRepositoryError>;

    /// Remove a course, failing with `NotFound` when absent.
    async fn delete(&self, id: CourseId) -> Result<(), CourseRepositoryError>;
}
