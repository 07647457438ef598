//! Driving port for course reads, including the lookup used by the student
//! service.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CourseSummary, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    async fn list(&self) -> Result<Vec<Course>, Error>;

    async fn get(&self, id: CourseId) -> Result<Course, Error>;

    /// Summaries for the requested ids that exist. Never includes ids that
    /// were not requested.
    async fn resolve(&self, ids: BTreeSet<CourseId>) -> Result<Vec<CourseSummary>, Error>;
}
