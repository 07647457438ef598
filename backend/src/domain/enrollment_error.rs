//! Typed failures of the student enrollment operations.
//!
//! Client-input failures (`NotFound`, `DuplicateEmail`, `UnknownReferences`)
//! are deterministic. `CollaboratorUnavailable` means the course service
//! could not confirm the request right now and callers may retry.

use std::collections::BTreeSet;

use serde_json::json;

use super::course::CourseId;
use super::error::Error;
use super::ports::StudentRepositoryError;
use super::student::StudentId;

fn join_ids(ids: &BTreeSet<CourseId>) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure of a student create, read, update, or delete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentError {
    #[error("student {id} not found")]
    NotFound { id: StudentId },
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
    #[error("unknown course ids: {}", join_ids(.ids))]
    UnknownReferences { ids: BTreeSet<CourseId> },
    #[error("course service unavailable: {message}")]
    CollaboratorUnavailable { message: String },
    #[error("student store unavailable: {message}")]
    StoreUnavailable { message: String },
    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

/// Failure of write-time reference validation.
///
/// A strict subset of [`EnrollmentError`] so the validator's signature shows
/// it can only reject references or report the collaborator as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceValidationError {
    #[error("unknown course ids: {}", join_ids(.ids))]
    UnknownReferences { ids: BTreeSet<CourseId> },
    #[error("course service unavailable: {message}")]
    CollaboratorUnavailable { message: String },
}

impl From<ReferenceValidationError> for EnrollmentError {
    fn from(value: ReferenceValidationError) -> Self {
        match value {
            ReferenceValidationError::UnknownReferences { ids } => Self::UnknownReferences { ids },
            ReferenceValidationError::CollaboratorUnavailable { message } => {
                Self::CollaboratorUnavailable { message }
            }
        }
    }
}

impl From<StudentRepositoryError> for EnrollmentError {
    fn from(value: StudentRepositoryError) -> Self {
        match value {
            StudentRepositoryError::DuplicateEmail { email } => Self::DuplicateEmail { email },
            StudentRepositoryError::NotFound { id } => Self::NotFound { id },
            StudentRepositoryError::Connection { message } => Self::StoreUnavailable { message },
            StudentRepositoryError::Query { message } => Self::Unexpected { message },
        }
    }
}

impl From<EnrollmentError> for Error {
    fn from(value: EnrollmentError) -> Self {
        match value {
            EnrollmentError::NotFound { id } => {
                Error::not_found(format!("student {id} not found")).with_details(json!({
                    "id": id,
                }))
            }
            EnrollmentError::DuplicateEmail { email } => Error::duplicate_email(format!(
                "email {email} is already registered"
            ))
            .with_details(json!({ "field": "email", "email": email })),
            EnrollmentError::UnknownReferences { ids } => {
                let message = format!("unknown course ids: {}", join_ids(&ids));
                Error::unknown_references(message).with_details(json!({
                    "field": "courseIds",
                    "unknownCourseIds": ids,
                }))
            }
            EnrollmentError::CollaboratorUnavailable { .. } => {
                Error::collaborator_unavailable("course service is unavailable; retry later")
            }
            EnrollmentError::StoreUnavailable { .. } => {
                Error::service_unavailable("student store is unavailable")
            }
            EnrollmentError::Unexpected { message } => Error::internal(message),
        }
    }
}
