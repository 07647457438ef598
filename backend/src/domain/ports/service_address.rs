//! Driven port for resolving logical service names to base addresses.
//!
//! Callers ask for a collaborator by name at call time; where that name
//! points is decided by whichever discovery or configuration adapter is
//! injected.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// Logical name of the course service collaborator.
pub const COURSE_SERVICE: &str = "course-service";

define_port_error! {
    /// Errors raised while resolving a service address.
    pub enum ServiceAddressError {
        /// No address is registered for the requested name.
        Unknown { service: String } =>
            "no address registered for service {service}",
        /// The registry returned an address that is not usable.
        Invalid { service: String, message: String } =>
            "address for service {service} is invalid: {message}",
    }
}

/// Port for mapping a logical service name to its current base URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceAddressResolver: Send + Sync {
    /// Resolve `service` to a base URL such as `http://courses:8081/`.
    async fn resolve(&self, service: &str) -> Result<Url, ServiceAddressError>;
}
