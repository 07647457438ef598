//! OpenAPI documentation configuration.
//!
//! One document per service. Each registers:
//!
//! - **Paths**: the service's handlers plus the shared health probes.
//! - **Schemas**: request bodies, response shapes, and the error payload
//!   wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]).
//!
//! The generated documents are served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Course, CourseId, CourseSummary, StudentId, StudentView};
use crate::inbound::http::courses::{CourseLookupRequest, CourseRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::students::StudentRequest;

/// OpenAPI document for the student service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student service API",
        description = "Student records whose course enrollments are validated against, and enriched from, the course service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        StudentRequest,
        StudentView,
        StudentId,
        CourseSummary,
        CourseId,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "students", description = "Student records and enrollments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct StudentApiDoc;

/// OpenAPI document for the course service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course service API",
        description = "Course records and the id lookup used by the student service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::resolve_courses,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CourseRequest,
        CourseLookupRequest,
        Course,
        CourseSummary,
        CourseId,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "courses", description = "Course records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct CourseApiDoc;
