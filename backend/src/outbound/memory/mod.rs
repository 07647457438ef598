//! In-memory repositories.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. They enforce the same uniqueness rules as the PostgreSQL schema and
//! assign identifiers from a monotonically increasing counter, like
//! `BIGSERIAL`.

mod course_repository;
mod student_repository;

pub use course_repository::InMemoryCourseRepository;
pub use student_repository::InMemoryStudentRepository;
