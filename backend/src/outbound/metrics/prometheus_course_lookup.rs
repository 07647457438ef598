//! Prometheus adapter for course lookup outcome counters.
//!
//! One counter family, `course_lookups_total`, labelled by `purpose`
//! (`validation`, `enrichment`) and `outcome` (`resolved`, `rejected`,
//! `failed`, `degraded`).

use async_trait::async_trait;
use prometheus::{CounterVec, Opts, Registry};

use crate::domain::ports::{
    CourseLookupMetrics, CourseLookupMetricsError, LookupOutcome, LookupPurpose,
};

/// Prometheus-backed recorder for course lookup outcomes.
pub struct PrometheusCourseLookupMetrics {
    lookups_total: CounterVec,
}

impl PrometheusCourseLookupMetrics {
    /// Create and register the counter with the provided registry.
    ///
    /// # Errors
    ///
    /// Returns an error when Prometheus rejects metric registration.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let lookups_total = CounterVec::new(
            Opts::new(
                "course_lookups_total",
                "Course service lookups by purpose and outcome",
            ),
            &["purpose", "outcome"],
        )?;
        registry.register(Box::new(lookups_total.clone()))?;
        Ok(Self { lookups_total })
    }
}

#[async_trait]
impl CourseLookupMetrics for PrometheusCourseLookupMetrics {
    async fn record(
        &self,
        purpose: LookupPurpose,
        outcome: LookupOutcome,
    ) -> Result<(), CourseLookupMetricsError> {
        self.lookups_total
            .get_metric_with_label_values(&[purpose.as_label(), outcome.as_label()])
            .map_err(|err| CourseLookupMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}
