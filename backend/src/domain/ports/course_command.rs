//! Driving port for course write operations.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Create a course; titles are unique.
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error>;

    async fn update(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error>;

    /// Delete a course. Students that reference it keep the dangling id.
    async fn delete(&self, id: CourseId) -> Result<(), Error>;
}
