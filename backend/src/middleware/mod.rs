//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by both services, currently
//! trace correlation.

pub mod trace;

pub use trace::Trace;
