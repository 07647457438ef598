//! Course lookup outbound adapter.
//!
//! Thin reqwest implementation of the `CourseLookup` port that calls the
//! course service's `POST /courses/byIds` endpoint.

mod dto;
mod http_client;

pub use http_client::HttpCourseLookup;
