//! Student records and the enriched read shape.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::course::{CourseId, CourseSummary};

/// Store-assigned student identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(example = 7)]
pub struct StudentId(i64);

impl StudentId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value as stored in the database.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for StudentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Student contents before the store assigns an identifier.
///
/// Also used as the replacement payload for updates: every field overwrites
/// the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_ids: BTreeSet<CourseId>,
}

/// Persisted student record.
///
/// `course_ids` is a set: duplicates collapse and ordering carries no
/// meaning. Ids are validated against the course service at write time only,
/// so a stored id may dangle once the course is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_ids: BTreeSet<CourseId>,
}

impl Student {
    /// Combine an identifier with draft contents.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeSet;
    /// use enrollment::domain::{Student, StudentDraft, StudentId};
    ///
    /// let draft = StudentDraft {
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     email: "ada@example.com".into(),
    ///     course_ids: BTreeSet::new(),
    /// };
    /// let student = Student::from_draft(StudentId::new(1), draft);
    /// assert_eq!(student.email, "ada@example.com");
    /// ```
    pub fn from_draft(id: StudentId, draft: StudentDraft) -> Self {
        let StudentDraft {
            first_name,
            last_name,
            email,
            course_ids,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
            course_ids,
        }
    }

    /// Attach resolved course summaries to produce the response shape.
    pub fn into_view(self, courses: Vec<CourseSummary>) -> StudentView {
        StudentView {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            course_ids: self.course_ids.into_iter().collect(),
            courses,
        }
    }
}

/// Student record plus whichever course summaries could be resolved.
///
/// `courses` may hold fewer entries than `courseIds` when the course service
/// is unreachable or a referenced course was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    pub id: StudentId,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub course_ids: Vec<CourseId>,
    pub courses: Vec<CourseSummary>,
}
