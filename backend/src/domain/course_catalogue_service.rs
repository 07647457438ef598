//! Course catalogue services.
//!
//! Implements the course driving ports on top of a course repository. The
//! `resolve` query backs the lookup endpoint the student service calls.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{CourseCommand, CourseQuery, CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId, CourseSummary, Error};

fn map_repository_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::DuplicateTitle { title } => {
            Error::duplicate_title(format!("a course titled {title} already exists"))
                .with_details(json!({ "field": "title", "title": title }))
        }
        CourseRepositoryError::NotFound { id } => course_not_found(id),
    }
}

fn course_not_found(id: CourseId) -> Error {
    Error::not_found(format!("course {id} not found")).with_details(json!({ "id": id }))
}

/// Course service implementing both course driving ports.
#[derive(Clone)]
pub struct CourseCatalogueService<R> {
    courses: Arc<R>,
}

impl<R> CourseCatalogueService<R> {
    pub fn new(courses: Arc<R>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl<R> CourseCommand for CourseCatalogueService<R>
where
    R: CourseRepository,
{
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error> {
        let course = self
            .courses
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(course_id = %course.id, "course created");
        Ok(course)
    }

    async fn update(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error> {
        self.courses
            .update(id, &draft)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: CourseId) -> Result<(), Error> {
        self.courses
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(course_id = %id, "course deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> CourseQuery for CourseCatalogueService<R>
where
    R: CourseRepository,
{
    async fn list(&self) -> Result<Vec<Course>, Error> {
        self.courses.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| course_not_found(id))
    }

    async fn resolve(&self, ids: BTreeSet<CourseId>) -> Result<Vec<CourseSummary>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let courses = self
            .courses
            .find_by_ids(&ids)
            .await
            .map_err(map_repository_error)?;
        Ok(courses
            .into_iter()
            .filter(|course| ids.contains(&course.id))
            .map(CourseSummary::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCourseRepository;
    use rstest::rstest;

    fn course(id: i64, title: &str) -> Course {
        Course::from_draft(
            CourseId::new(id),
            CourseDraft::new(title, "Sample").expect("valid draft"),
        )
    }

    #[tokio::test]
    async fn resolve_empty_set_skips_repository() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_ids().times(0);

        let service = CourseCatalogueService::new(Arc::new(repo));
        let resolved = service.resolve(BTreeSet::new()).await.expect("resolve");
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn resolve_never_returns_unrequested_ids() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_ids()
            .times(1)
            .return_once(|_| Ok(vec![course(1, "Algebra"), course(2, "Biology")]));

        let service = CourseCatalogueService::new(Arc::new(repo));
        let resolved = service
            .resolve([CourseId::new(1), CourseId::new(9)].into())
            .await
            .expect("resolve");

        let ids: Vec<_> = resolved.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CourseId::new(1)]);
    }

    #[tokio::test]
    async fn get_missing_course_is_not_found() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let service = CourseCatalogueService::new(Arc::new(repo));
        let err = service.get(CourseId::new(4)).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(CourseRepositoryError::duplicate_title("Algebra"), ErrorCode::DuplicateTitle)]
    #[case(CourseRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CourseRepositoryError::query("bad sql"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn create_maps_repository_errors(
        #[case] failure: CourseRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockCourseRepository::new();
        repo.expect_insert().return_once(move |_| Err(failure));

        let service = CourseCatalogueService::new(Arc::new(repo));
        let err = service
            .create(CourseDraft::new("Algebra", "Equations").expect("valid draft"))
            .await
            .expect_err("insert fails");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn delete_missing_course_is_not_found() {
        let mut repo = MockCourseRepository::new();
        repo.expect_delete()
            .return_once(|id| Err(CourseRepositoryError::not_found(id)));

        let service = CourseCatalogueService::new(Arc::new(repo));
        let err = service.delete(CourseId::new(5)).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
