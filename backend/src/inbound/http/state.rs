//! Shared HTTP adapter state.
//!
//! HTTP handlers accept these via `actix_web::web::Data` so they only depend
//! on domain ports (use-cases) and remain testable without I/O. Each service
//! binary registers only the state its routes need.

use std::sync::Arc;

use crate::domain::ports::{CourseCommand, CourseQuery, StudentCommand, StudentQuery};

/// Ports backing the student routes.
#[derive(Clone)]
pub struct StudentHttpState {
    pub students: Arc<dyn StudentCommand>,
    pub students_query: Arc<dyn StudentQuery>,
}

impl StudentHttpState {
    /// Bundle the student command and query ports. One service usually
    /// implements both.
    pub fn new(students: Arc<dyn StudentCommand>, students_query: Arc<dyn StudentQuery>) -> Self {
        Self {
            students,
            students_query,
        }
    }
}

/// Ports backing the course routes.
#[derive(Clone)]
pub struct CourseHttpState {
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
}

impl CourseHttpState {
    /// Bundle the course command and query ports.
    pub fn new(courses: Arc<dyn CourseCommand>, courses_query: Arc<dyn CourseQuery>) -> Self {
        Self {
            courses,
            courses_query,
        }
    }
}
