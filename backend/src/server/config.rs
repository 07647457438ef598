//! HTTP server configuration objects.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use crate::domain::ports::ServiceAddressResolver;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration shared by both service binaries.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration that binds to `bind_addr` and uses the
    /// in-memory stores until a pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

/// How the student service reaches the course service.
#[derive(Clone)]
pub struct CourseLookupConfig {
    pub(crate) resolver: Arc<dyn ServiceAddressResolver>,
    pub(crate) timeout: Duration,
}

impl CourseLookupConfig {
    /// Resolve `course-service` through `resolver` and bound every lookup by
    /// `timeout`.
    #[must_use]
    pub fn new(resolver: Arc<dyn ServiceAddressResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }
}
