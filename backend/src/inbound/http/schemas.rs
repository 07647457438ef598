//! OpenAPI schema definitions for the error payload.
//!
//! The domain error type stays framework-agnostic by not deriving
//! `ToSchema`. These wrappers mirror its structure and register it with
//! utoipa under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Another student already uses the email address.
    #[schema(rename = "duplicate_email")]
    DuplicateEmail,
    /// One or more course ids do not exist.
    #[schema(rename = "unknown_references")]
    UnknownReferences,
    /// Another course already uses the title.
    #[schema(rename = "duplicate_title")]
    DuplicateTitle,
    /// The course service could not confirm the request; retry later.
    #[schema(rename = "collaborator_unavailable")]
    CollaboratorUnavailable,
    /// Local storage is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "unknown_references")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "unknown course ids: 999")]
    message: String,
    /// Correlation identifier for tracing this error across services.
    #[schema(example = "6f1c4a2e-2a44-4c55-9b0e-1d2f3a4b5c6d")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field or ids.
    details: Option<serde_json::Value>,
}
