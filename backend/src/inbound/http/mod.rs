//! HTTP inbound adapter exposing the student and course REST endpoints.

pub mod courses;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod students;

pub use error::ApiResult;
