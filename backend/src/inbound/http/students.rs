//! Student HTTP handlers.
//!
//! ```text
//! GET    /students
//! GET    /students/{id}
//! POST   /students        {"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","courseIds":[101]}
//! PUT    /students/{id}
//! DELETE /students/{id}
//! ```

use std::collections::BTreeSet;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CourseId, StudentDraft, StudentId, StudentView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::StudentHttpState;

/// Create or replace payload for a student.
///
/// `courseIds` may be omitted; duplicates collapse.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = json!([101, 102]))]
    pub course_ids: Vec<i64>,
}

impl From<StudentRequest> for StudentDraft {
    fn from(value: StudentRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            course_ids: value
                .course_ids
                .into_iter()
                .map(CourseId::new)
                .collect::<BTreeSet<_>>(),
        }
    }
}

/// List every student with resolved course summaries.
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "Students", body = [StudentView]),
        (status = 503, description = "Student store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<StudentHttpState>,
) -> ApiResult<web::Json<Vec<StudentView>>> {
    let views = state.students_query.list().await?;
    Ok(web::Json(views))
}

/// Fetch one student. Course summaries are best effort: when the course
/// service is unreachable `courses` is empty and the call still succeeds.
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = StudentView),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<StudentHttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<StudentView>> {
    let id = StudentId::new(path.into_inner());
    let view = state.students_query.get(id).await?;
    Ok(web::Json(view))
}

/// Register a student after validating email uniqueness and course ids.
#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentView),
        (status = 400, description = "Duplicate email, unknown course ids, or malformed body", body = ErrorSchema),
        (status = 502, description = "Course service unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<StudentHttpState>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<HttpResponse> {
    let view = state
        .students
        .create(StudentDraft::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(view))
}

/// Replace every field of a student.
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentView),
        (status = 400, description = "Duplicate email, unknown course ids, or malformed body", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 502, description = "Course service unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<StudentHttpState>,
    path: web::Path<i64>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<web::Json<StudentView>> {
    let id = StudentId::new(path.into_inner());
    let view = state
        .students
        .update(id, StudentDraft::from(payload.into_inner()))
        .await?;
    Ok(web::Json(view))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<StudentHttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .students
        .delete(StudentId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every student route on an actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_students)
        .service(get_student)
        .service(create_student)
        .service(update_student)
        .service(delete_student);
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
