//! Student enrollment services.
//!
//! Two HTTP services share this library: the course service owns course
//! records and answers id lookups; the student service owns student records
//! and reconciles their course references against the course service.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use middleware::Trace;
