//! Builders for HTTP state ports.
//!
//! A configured pool selects the Diesel repositories; otherwise the
//! in-memory repositories back the services.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    CourseCommand, CourseLookup, CourseLookupMetrics, CourseQuery, CourseRepository,
    StudentCommand, StudentQuery, StudentRepository,
};
use crate::domain::{
    CourseCatalogueService, EnrollmentEnricher, ReferenceValidator, StudentService,
};
use crate::inbound::http::state::{CourseHttpState, StudentHttpState};
use crate::outbound::memory::{InMemoryCourseRepository, InMemoryStudentRepository};
use crate::outbound::persistence::{DbPool, DieselCourseRepository, DieselStudentRepository};

fn student_state_from<R>(
    repository: Arc<R>,
    lookup: Arc<dyn CourseLookup>,
    metrics: Arc<dyn CourseLookupMetrics>,
) -> StudentHttpState
where
    R: StudentRepository + 'static,
{
    let validator = ReferenceValidator::new(lookup.clone(), metrics.clone());
    let enricher = EnrollmentEnricher::new(lookup, metrics);
    let service = Arc::new(StudentService::new(repository, validator, enricher));
    let command: Arc<dyn StudentCommand> = service.clone();
    let query: Arc<dyn StudentQuery> = service;
    StudentHttpState::new(command, query)
}

fn course_state_from<R>(repository: Arc<R>) -> CourseHttpState
where
    R: CourseRepository + 'static,
{
    let service = Arc::new(CourseCatalogueService::new(repository));
    let command: Arc<dyn CourseCommand> = service.clone();
    let query: Arc<dyn CourseQuery> = service;
    CourseHttpState::new(command, query)
}

/// Wire the student service over the configured store and course lookup.
pub fn build_student_state(
    db_pool: Option<&DbPool>,
    lookup: Arc<dyn CourseLookup>,
    metrics: Arc<dyn CourseLookupMetrics>,
) -> web::Data<StudentHttpState> {
    let state = match db_pool {
        Some(pool) => student_state_from(
            Arc::new(DieselStudentRepository::new(pool.clone())),
            lookup,
            metrics,
        ),
        None => student_state_from(Arc::new(InMemoryStudentRepository::new()), lookup, metrics),
    };
    web::Data::new(state)
}

/// Wire the course service over the configured store.
pub fn build_course_state(db_pool: Option<&DbPool>) -> web::Data<CourseHttpState> {
    let state = match db_pool {
        Some(pool) => course_state_from(Arc::new(DieselCourseRepository::new(pool.clone()))),
        None => course_state_from(Arc::new(InMemoryCourseRepository::new())),
    };
    web::Data::new(state)
}
