//! Course HTTP handlers, including the lookup endpoint the student service
//! calls to validate and enrich enrollments.
//!
//! ```text
//! GET    /courses
//! GET    /courses/{id}
//! POST   /courses          {"title":"Algebra","description":"Linear equations"}
//! POST   /courses/byIds    {"courseIds":[101,999]}
//! PUT    /courses/{id}
//! DELETE /courses/{id}
//! ```

use std::collections::BTreeSet;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Course, CourseDraft, CourseId, CourseSummary, CourseValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::CourseHttpState;

/// Create or replace payload for a course.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[schema(example = "Algebra")]
    pub title: String,
    #[schema(example = "Linear equations and inequalities")]
    pub description: String,
}

/// Lookup payload: the ids to resolve. Unknown ids are simply absent from
/// the response.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseLookupRequest {
    #[schema(example = json!([101, 999]))]
    pub course_ids: Vec<i64>,
}

fn map_validation_error(err: CourseValidationError) -> Error {
    let field = match err {
        CourseValidationError::EmptyTitle => "title",
        CourseValidationError::EmptyDescription => "description",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

impl TryFrom<CourseRequest> for CourseDraft {
    type Error = Error;

    fn try_from(value: CourseRequest) -> Result<Self, Self::Error> {
        CourseDraft::new(value.title, value.description).map_err(map_validation_error)
    }
}

#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "Courses", body = [Course]),
        (status = 503, description = "Course store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<CourseHttpState>) -> ApiResult<web::Json<Vec<Course>>> {
    let courses = state.courses_query.list().await?;
    Ok(web::Json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<CourseHttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Course>> {
    let course = state
        .courses_query
        .get(CourseId::new(path.into_inner()))
        .await?;
    Ok(web::Json(course))
}

/// Resolve a set of course ids to the summaries of those that exist.
///
/// Always answers 200 for a well-formed body; the array may be empty and
/// never contains ids that were not requested.
#[utoipa::path(
    post,
    path = "/courses/byIds",
    request_body = CourseLookupRequest,
    responses(
        (status = 200, description = "Summaries of the requested courses that exist", body = [CourseSummary]),
        (status = 400, description = "Malformed body", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "resolveCourses"
)]
#[post("/courses/byIds")]
pub async fn resolve_courses(
    state: web::Data<CourseHttpState>,
    payload: web::Json<CourseLookupRequest>,
) -> ApiResult<web::Json<Vec<CourseSummary>>> {
    let ids: BTreeSet<CourseId> = payload
        .into_inner()
        .course_ids
        .into_iter()
        .map(CourseId::new)
        .collect();
    let summaries = state.courses_query.resolve(ids).await?;
    Ok(web::Json(summaries))
}

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Blank title or description", body = ErrorSchema),
        (status = 409, description = "Title already in use", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<CourseHttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state.courses.create(draft).await?;
    Ok(HttpResponse::Created().json(course))
}

#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Blank title or description", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 409, description = "Title already in use", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<CourseHttpState>,
    path: web::Path<i64>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<Course>> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state
        .courses
        .update(CourseId::new(path.into_inner()), draft)
        .await?;
    Ok(web::Json(course))
}

/// Delete a course. Student enrollments that reference it are left as
/// dangling ids.
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<CourseHttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .courses
        .delete(CourseId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every course route on an actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_courses)
        .service(resolve_courses)
        .service(create_course)
        .service(get_course)
        .service(update_course)
        .service(delete_course);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCourseCommand, MockCourseQuery};
    use crate::domain::ErrorCode;
    use crate::inbound::http::error::{json_config, path_config};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn test_app(
        command: MockCourseCommand,
        query: MockCourseQuery,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = CourseHttpState::new(Arc::new(command), Arc::new(query));
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(path_config())
            .configure(configure)
    }

    fn algebra() -> Course {
        Course::from_draft(
            CourseId::new(101),
            CourseDraft::new("Algebra", "Equations").expect("valid draft"),
        )
    }

    #[actix_web::test]
    async fn resolve_returns_summaries_for_known_ids() {
        let mut query = MockCourseQuery::new();
        query
            .expect_resolve()
            .withf(|ids| ids.iter().map(|id| id.get()).collect::<Vec<_>>() == vec![101, 999])
            .times(1)
            .returning(|_| Ok(vec![CourseSummary::from(algebra())]));
        let app = actix_test::init_service(test_app(MockCourseCommand::new(), query)).await;

        let request = actix_test::TestRequest::post()
            .uri("/courses/byIds")
            .set_json(json!({ "courseIds": [999, 101, 101] }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!([{ "id": 101, "title": "Algebra", "description": "Equations" }])
        );
    }

    #[actix_web::test]
    async fn resolve_rejects_body_without_course_ids() {
        let mut query = MockCourseQuery::new();
        query.expect_resolve().never();
        let app = actix_test::init_service(test_app(MockCourseCommand::new(), query)).await;

        let request = actix_test::TestRequest::post()
            .uri("/courses/byIds")
            .set_json(json!({ "ids": [1] }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case(json!({ "title": " ", "description": "x" }), "title")]
    #[case(json!({ "title": "Algebra", "description": "" }), "description")]
    #[actix_web::test]
    async fn create_rejects_blank_fields(#[case] payload: Value, #[case] field: &'static str) {
        let mut command = MockCourseCommand::new();
        command.expect_create().never();
        let app = actix_test::init_service(test_app(command, MockCourseQuery::new())).await;

        let request = actix_test::TestRequest::post()
            .uri("/courses")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_test::read_body_json(response).await;
        assert_eq!(body.details(), Some(&json!({ "field": field })));
    }

    #[actix_web::test]
    async fn create_returns_created_course() {
        let mut command = MockCourseCommand::new();
        command
            .expect_create()
            .withf(|draft| draft.title() == "Algebra")
            .times(1)
            .returning(|_| Ok(algebra()));
        let app = actix_test::init_service(test_app(command, MockCourseQuery::new())).await;

        let request = actix_test::TestRequest::post()
            .uri("/courses")
            .set_json(json!({ "title": "Algebra", "description": "Equations" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn duplicate_title_is_conflict() {
        let mut command = MockCourseCommand::new();
        command
            .expect_update()
            .times(1)
            .returning(|_, _| Err(Error::duplicate_title("a course titled Algebra already exists")));
        let app = actix_test::init_service(test_app(command, MockCourseQuery::new())).await;

        let request = actix_test::TestRequest::put()
            .uri("/courses/102")
            .set_json(json!({ "title": "Algebra", "description": "Equations" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Error = actix_test::read_body_json(response).await;
        assert_eq!(body.code(), ErrorCode::DuplicateTitle);
    }

    #[actix_web::test]
    async fn get_and_delete_missing_course_are_not_found() {
        let mut query = MockCourseQuery::new();
        query
            .expect_get()
            .returning(|id| Err(Error::not_found(format!("course {id} not found"))));
        let mut command = MockCourseCommand::new();
        command
            .expect_delete()
            .returning(|id| Err(Error::not_found(format!("course {id} not found"))));
        let app = actix_test::init_service(test_app(command, query)).await;

        let get = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/courses/7").to_request(),
        )
        .await;
        assert_eq!(get.status(), StatusCode::NOT_FOUND);

        let delete = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/courses/7").to_request(),
        )
        .await;
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_existing_course_is_no_content() {
        let mut command = MockCourseCommand::new();
        command.expect_delete().times(1).returning(|_| Ok(()));
        let app = actix_test::init_service(test_app(command, MockCourseQuery::new())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/courses/101").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
