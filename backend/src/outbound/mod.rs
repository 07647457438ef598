//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for database-less runs and tests
//! - **course_lookup**: reqwest client for the course service lookup endpoint
//! - **service_registry**: static logical-name → base URL resolution
//! - **metrics**: Prometheus-backed metrics exporters (feature-gated)
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod course_lookup;
pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
pub mod service_registry;

pub use service_registry::StaticServiceRegistry;
