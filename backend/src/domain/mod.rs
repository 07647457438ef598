//! Domain primitives, services, and ports.
//!
//! Purpose: hold the enrollment rules independent of HTTP and storage.
//! Students reference courses by id; the student side validates those
//! references on write and enriches them on read through the
//! [`ports::CourseLookup`] port.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-facing error payload.
//! - `EnrollmentError`: typed failure of student operations.
//! - `Course`, `CourseSummary`, `Student`, `StudentView`: records and shapes.
//! - `StudentService`, `CourseCatalogueService`: driving port implementations.

pub mod course;
pub mod course_catalogue_service;
pub mod enrollment_enricher;
pub mod enrollment_error;
pub mod error;
pub mod ports;
pub mod reference_validator;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::course::{Course, CourseDraft, CourseId, CourseSummary, CourseValidationError};
pub use self::course_catalogue_service::CourseCatalogueService;
pub use self::enrollment_enricher::EnrollmentEnricher;
pub use self::enrollment_error::{EnrollmentError, ReferenceValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::reference_validator::ReferenceValidator;
pub use self::student::{Student, StudentDraft, StudentId, StudentView};
pub use self::student_service::StudentService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
