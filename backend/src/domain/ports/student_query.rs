//! Driving port for student reads.

use async_trait::async_trait;

use crate::domain::{EnrollmentError, StudentId, StudentView};

/// Read side of the student service. Views are enriched on a best-effort
/// basis: an unreachable course service yields empty `courses`, not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    /// Every student in store order.
    async fn list(&self) -> Result<Vec<StudentView>, EnrollmentError>;

    async fn get(&self, id: StudentId) -> Result<StudentView, EnrollmentError>;
}
