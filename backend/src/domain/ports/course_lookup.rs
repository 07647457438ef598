//! Driven port for resolving course identifiers against the course service.
//!
//! The student side owns this contract: send a set of ids, receive the
//! summaries for the subset that exists. Adapters decide how the collaborator
//! is reached and must bound every call with a timeout.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{CourseId, CourseSummary};

use super::define_port_error;

define_port_error! {
    /// Failures raised while calling the course lookup endpoint.
    pub enum CourseLookupError {
        /// The logical service name could not be mapped to an address.
        AddressResolution { message: String } =>
            "course service address resolution failed: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "course lookup transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "course lookup timed out: {message}",
        /// The endpoint answered with a non-success status.
        Status { status: u16, message: String } =>
            "course lookup returned status {status}: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } =>
            "course lookup response decode failed: {message}",
    }
}

/// Port for resolving course identifiers into summaries.
///
/// Implementations return only summaries for requested ids that exist. The
/// result may be a strict subset of the request, or empty.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseLookup: Send + Sync {
    /// Resolve the given identifiers. `ids` is never empty when called from
    /// the domain services.
    async fn resolve(
        &self,
        ids: &BTreeSet<CourseId>,
    ) -> Result<Vec<CourseSummary>, CourseLookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CourseLookupError::timeout("after 3000ms"), "course lookup timed out: after 3000ms")]
    #[case(
        CourseLookupError::status(503_u16, "unavailable"),
        "course lookup returned status 503: unavailable"
    )]
    #[case(
        CourseLookupError::address_resolution("unknown service"),
        "course service address resolution failed: unknown service"
    )]
    fn errors_render_context(#[case] err: CourseLookupError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }
}
