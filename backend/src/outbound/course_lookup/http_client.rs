//! Reqwest-backed course lookup adapter.
//!
//! This adapter owns transport details only: address resolution per call,
//! request serialisation, the client-wide timeout, status mapping, and JSON
//! decoding into domain summaries. Dropping the returned future cancels the
//! in-flight request.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::dto::{CourseLookupRequestDto, CourseSummaryDto};
use crate::domain::ports::{
    COURSE_SERVICE, CourseLookup, CourseLookupError, ServiceAddressResolver,
};
use crate::domain::{CourseId, CourseSummary, TRACE_ID_HEADER, TraceId};

const LOOKUP_PATH: &str = "courses/byIds";

/// Course lookup adapter that POSTs id sets to the course service.
pub struct HttpCourseLookup {
    client: Client,
    resolver: Arc<dyn ServiceAddressResolver>,
}

impl HttpCourseLookup {
    /// Build an adapter whose every call is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        resolver: Arc<dyn ServiceAddressResolver>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, resolver })
    }

    async fn endpoint(&self) -> Result<Url, CourseLookupError> {
        let base = self
            .resolver
            .resolve(COURSE_SERVICE)
            .await
            .map_err(|err| CourseLookupError::address_resolution(err.to_string()))?;
        lookup_endpoint(base)
    }
}

#[async_trait]
impl CourseLookup for HttpCourseLookup {
    async fn resolve(
        &self,
        ids: &BTreeSet<CourseId>,
    ) -> Result<Vec<CourseSummary>, CourseLookupError> {
        let endpoint = self.endpoint().await?;
        debug!(%endpoint, requested = ids.len(), "resolving course ids");

        let mut request = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&CourseLookupRequestDto::from(ids));
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status != StatusCode::OK {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_summaries(body.as_ref())
    }
}

/// Append the lookup path to a base URL, keeping any path prefix the base
/// already has.
fn lookup_endpoint(mut base: Url) -> Result<Url, CourseLookupError> {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(LOOKUP_PATH).map_err(|err| {
        CourseLookupError::address_resolution(format!("invalid course service base URL: {err}"))
    })
}

fn parse_summaries(body: &[u8]) -> Result<Vec<CourseSummary>, CourseLookupError> {
    let decoded: Vec<CourseSummaryDto> = serde_json::from_slice(body).map_err(|error| {
        CourseLookupError::decode(format!("invalid course lookup payload: {error}"))
    })?;
    Ok(decoded.into_iter().map(CourseSummary::from).collect())
}

fn map_transport_error(error: reqwest::Error) -> CourseLookupError {
    if error.is_timeout() {
        CourseLookupError::timeout(error.to_string())
    } else if error.is_decode() {
        CourseLookupError::decode(error.to_string())
    } else {
        CourseLookupError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CourseLookupError {
    CourseLookupError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
