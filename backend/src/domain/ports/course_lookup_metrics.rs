//! Domain port for course lookup outcome counters.
//!
//! Validation and enrichment both call the course service; operators need to
//! see how often each path resolved, rejected, failed, or degraded without the
//! domain depending on a metrics exporter.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording lookup metrics.
    pub enum CourseLookupMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } =>
            "course lookup metrics exporter failed: {message}",
    }
}

/// Which domain path issued the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPurpose {
    /// Write-time reference validation.
    Validation,
    /// Read-time enrichment.
    Enrichment,
}

impl LookupPurpose {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Enrichment => "enrichment",
        }
    }
}

/// Result of one lookup from the domain's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Every requested id resolved.
    Resolved,
    /// Validation found ids the course service does not know.
    Rejected,
    /// Validation could not reach the course service.
    Failed,
    /// Enrichment could not reach the course service and returned nothing.
    Degraded,
}

impl LookupOutcome {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
            Self::Degraded => "degraded",
        }
    }
}

/// Metrics recording port for course lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseLookupMetrics: Send + Sync {
    /// Record one lookup outcome.
    ///
    /// ```rust,ignore
    /// use enrollment::domain::ports::{
    ///     CourseLookupMetrics, LookupOutcome, LookupPurpose, NoOpCourseLookupMetrics,
    /// };
    ///
    /// # async fn demo() {
    /// let metrics = NoOpCourseLookupMetrics;
    /// let result = metrics
    ///     .record(LookupPurpose::Enrichment, LookupOutcome::Degraded)
    ///     .await;
    /// assert!(result.is_ok());
    /// # }
    /// ```
    async fn record(
        &self,
        purpose: LookupPurpose,
        outcome: LookupOutcome,
    ) -> Result<(), CourseLookupMetricsError>;
}

/// No-op implementation used when metrics are disabled or in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCourseLookupMetrics;

#[async_trait]
impl CourseLookupMetrics for NoOpCourseLookupMetrics {
    async fn record(
        &self,
        _purpose: LookupPurpose,
        _outcome: LookupOutcome,
    ) -> Result<(), CourseLookupMetricsError> {
        Ok(())
    }
}
