//! Write-time validation of course references.
//!
//! Before a student's enrollment set is stored, every id must resolve in the
//! course service. A collaborator failure is a hard error here: nothing is
//! persisted and the caller sees `CollaboratorUnavailable`. Failures are not
//! retried.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::ports::{CourseLookup, CourseLookupMetrics, LookupOutcome, LookupPurpose};
use crate::domain::{CourseId, ReferenceValidationError};

/// Checks candidate course ids against the course lookup port.
#[derive(Clone)]
pub struct ReferenceValidator {
    lookup: Arc<dyn CourseLookup>,
    metrics: Arc<dyn CourseLookupMetrics>,
}

impl ReferenceValidator {
    /// Validate through `lookup`, recording each outcome in `metrics`.
    pub fn new(lookup: Arc<dyn CourseLookup>, metrics: Arc<dyn CourseLookupMetrics>) -> Self {
        Self { lookup, metrics }
    }

    /// Succeed when every id in `candidates` exists.
    ///
    /// An empty set succeeds without calling the course service. Otherwise
    /// the error names exactly the ids the course service did not return.
    pub async fn validate(
        &self,
        candidates: &BTreeSet<CourseId>,
    ) -> Result<(), ReferenceValidationError> {
        if candidates.is_empty() {
            return Ok(());
        }

        let resolved = match self.lookup.resolve(candidates).await {
            Ok(resolved) => resolved,
            Err(err) => {
                error!(error = %err, requested = candidates.len(), "course validation lookup failed");
                self.record(LookupOutcome::Failed).await;
                return Err(ReferenceValidationError::CollaboratorUnavailable {
                    message: err.to_string(),
                });
            }
        };

        let found: BTreeSet<CourseId> = resolved.iter().map(|course| course.id).collect();
        let unknown: BTreeSet<CourseId> = candidates.difference(&found).copied().collect();
        if unknown.is_empty() {
            self.record(LookupOutcome::Resolved).await;
            return Ok(());
        }

        debug!(unknown = ?unknown, "rejecting unknown course references");
        self.record(LookupOutcome::Rejected).await;
        Err(ReferenceValidationError::UnknownReferences { ids: unknown })
    }

    async fn record(&self, outcome: LookupOutcome) {
        if let Err(err) = self.metrics.record(LookupPurpose::Validation, outcome).await {
            debug!(error = %err, "failed to record course lookup metric");
        }
    }
}
