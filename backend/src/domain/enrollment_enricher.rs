//! Read-time enrichment of student enrollments.
//!
//! Enrichment decorates a student view with course summaries and must never
//! fail the read. Collaborator failures are logged, counted, and replaced by
//! an empty list.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{CourseLookup, CourseLookupMetrics, LookupOutcome, LookupPurpose};
use crate::domain::{CourseId, CourseSummary};

/// Attaches course summaries to enrolled ids on a best-effort basis.
#[derive(Clone)]
pub struct EnrollmentEnricher {
    lookup: Arc<dyn CourseLookup>,
    metrics: Arc<dyn CourseLookupMetrics>,
}

impl EnrollmentEnricher {
    /// Enrich through `lookup`, recording each outcome in `metrics`.
    pub fn new(lookup: Arc<dyn CourseLookup>, metrics: Arc<dyn CourseLookupMetrics>) -> Self {
        Self { lookup, metrics }
    }

    /// Summaries for whichever of `enrolled` the course service returned.
    ///
    /// The result is passed through as received: it may be shorter than
    /// `enrolled` when a course was deleted after enrollment.
    pub async fn enrich(&self, enrolled: &BTreeSet<CourseId>) -> Vec<CourseSummary> {
        if enrolled.is_empty() {
            return Vec::new();
        }

        match self.lookup.resolve(enrolled).await {
            Ok(courses) => {
                self.record(LookupOutcome::Resolved).await;
                courses
            }
            Err(err) => {
                warn!(
                    error = %err,
                    unresolved = enrolled.len(),
                    "course enrichment degraded; returning no courses"
                );
                self.record(LookupOutcome::Degraded).await;
                Vec::new()
            }
        }
    }

    async fn record(&self, outcome: LookupOutcome) {
        if let Err(err) = self.metrics.record(LookupPurpose::Enrichment, outcome).await {
            debug!(error = %err, "failed to record course lookup metric");
        }
    }
}
