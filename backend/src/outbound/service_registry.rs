//! Static service address registry.
//!
//! Maps logical service names to base URLs supplied at start-up (settings,
//! environment). Stands in for a discovery client behind the
//! `ServiceAddressResolver` port.

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use crate::domain::ports::{ServiceAddressError, ServiceAddressResolver};

/// In-process name → base URL table.
///
/// # Examples
/// ```
/// use enrollment::outbound::StaticServiceRegistry;
/// use url::Url;
///
/// let registry = StaticServiceRegistry::new()
///     .with_service("course-service", Url::parse("http://courses:8081").expect("url"));
/// assert!(registry.contains("course-service"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticServiceRegistry {
    services: HashMap<String, Url>,
}

impl StaticServiceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the address for `name`.
    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>, base: Url) -> Self {
        self.services.insert(name.into(), base);
        self
    }

    /// Whether an address is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }
}

#[async_trait]
impl ServiceAddressResolver for StaticServiceRegistry {
    async fn resolve(&self, service: &str) -> Result<Url, ServiceAddressError> {
        let base = self
            .services
            .get(service)
            .ok_or_else(|| ServiceAddressError::unknown(service))?;
        if base.cannot_be_a_base() {
            return Err(ServiceAddressError::invalid(
                service,
                format!("{base} cannot be used as a base URL"),
            ));
        }
        Ok(base.clone())
    }
}
