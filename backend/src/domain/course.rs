//! Course records owned by the course service.
//!
//! The student side never stores these types; it only sees the
//! [`CourseSummary`] projection returned by the lookup endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned course identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(example = 101)]
pub struct CourseId(i64);

impl CourseId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value as stored in the database.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CourseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`CourseDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    #[error("course title must not be empty")]
    EmptyTitle,
    #[error("course description must not be empty")]
    EmptyDescription,
}

/// Unsaved course contents.
///
/// Titles and descriptions are stored trimmed and must not be blank.
///
/// # Examples
/// ```
/// use enrollment::domain::CourseDraft;
///
/// let draft = CourseDraft::new("  Algebra ", "Linear equations").expect("valid draft");
/// assert_eq!(draft.title(), "Algebra");
/// assert!(CourseDraft::new(" ", "x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    title: String,
    description: String,
}

impl CourseDraft {
    pub fn new(
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<Self, CourseValidationError> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(CourseValidationError::EmptyDescription);
        }
        Ok(Self {
            title: title.to_owned(),
            description: description.to_owned(),
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Persisted course record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    #[schema(example = "Algebra")]
    pub title: String,
    #[schema(example = "Linear equations and inequalities")]
    pub description: String,
}

impl Course {
    /// Attach a store-assigned identifier to validated draft contents.
    pub fn from_draft(id: CourseId, draft: CourseDraft) -> Self {
        let CourseDraft { title, description } = draft;
        Self {
            id,
            title,
            description,
        }
    }
}

/// Read-only course projection returned by the lookup endpoint.
///
/// Fetched fresh per request and never cached by the student service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: CourseId,
    #[schema(example = "Algebra")]
    pub title: String,
    #[schema(example = "Linear equations and inequalities")]
    pub description: String,
}

impl From<Course> for CourseSummary {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
        }
    }
}
