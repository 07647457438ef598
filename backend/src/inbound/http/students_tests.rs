//! Tests for student HTTP handlers.

use super::*;
use crate::domain::ports::{MockStudentCommand, MockStudentQuery};
use crate::domain::{CourseSummary, EnrollmentError, Error, ErrorCode};
use crate::inbound::http::error::{json_config, path_config};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app(
    command: MockStudentCommand,
    query: MockStudentQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = StudentHttpState::new(Arc::new(command), Arc::new(query));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .configure(configure)
}

fn ada_view(course_ids: &[i64], courses: Vec<CourseSummary>) -> StudentView {
    StudentView {
        id: StudentId::new(1),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        course_ids: course_ids.iter().copied().map(CourseId::new).collect(),
        courses,
    }
}

fn summary(id: i64, title: &str) -> CourseSummary {
    CourseSummary {
        id: CourseId::new(id),
        title: title.into(),
        description: format!("{title} description"),
    }
}

fn ada_payload(course_ids: &[i64]) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "courseIds": course_ids,
    })
}

#[test]
fn request_converts_field_by_field_and_collapses_ids() {
    let request: StudentRequest =
        serde_json::from_value(ada_payload(&[102, 101, 102])).expect("decode request");
    let draft = StudentDraft::from(request);
    assert_eq!(draft.first_name, "Ada");
    assert_eq!(draft.last_name, "Lovelace");
    assert_eq!(draft.email, "ada@example.com");
    assert_eq!(
        draft.course_ids.into_iter().collect::<Vec<_>>(),
        vec![CourseId::new(101), CourseId::new(102)]
    );
}

#[test]
fn request_without_course_ids_defaults_to_empty() {
    let request: StudentRequest = serde_json::from_value(json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
    }))
    .expect("decode request");
    assert!(StudentDraft::from(request).course_ids.is_empty());
}

#[actix_web::test]
async fn create_returns_created_with_enriched_view() {
    let mut command = MockStudentCommand::new();
    command
        .expect_create()
        .withf(|draft| draft.email == "ada@example.com" && draft.course_ids.len() == 2)
        .times(1)
        .returning(|_| {
            Ok(ada_view(
                &[101, 102],
                vec![summary(101, "Algebra"), summary(102, "Biology")],
            ))
        });
    let app = actix_test::init_service(test_app(command, MockStudentQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/students")
        .set_json(ada_payload(&[101, 102]))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["courseIds"], json!([101, 102]));
    assert_eq!(body["courses"][1]["title"], json!("Biology"));
}

#[rstest]
#[case(
    EnrollmentError::DuplicateEmail { email: "ada@example.com".into() },
    StatusCode::BAD_REQUEST,
    ErrorCode::DuplicateEmail
)]
#[case(
    EnrollmentError::UnknownReferences { ids: [CourseId::new(999)].into_iter().collect() },
    StatusCode::BAD_REQUEST,
    ErrorCode::UnknownReferences
)]
#[case(
    EnrollmentError::CollaboratorUnavailable { message: "timed out".into() },
    StatusCode::BAD_GATEWAY,
    ErrorCode::CollaboratorUnavailable
)]
#[case(
    EnrollmentError::StoreUnavailable { message: "pool closed".into() },
    StatusCode::SERVICE_UNAVAILABLE,
    ErrorCode::ServiceUnavailable
)]
#[actix_web::test]
async fn create_maps_enrollment_errors_to_statuses(
    #[case] failure: EnrollmentError,
    #[case] status: StatusCode,
    #[case] code: ErrorCode,
) {
    let mut command = MockStudentCommand::new();
    command
        .expect_create()
        .times(1)
        .returning(move |_| Err(failure.clone()));
    let app = actix_test::init_service(test_app(command, MockStudentQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/students")
        .set_json(ada_payload(&[999]))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Error = actix_test::read_body_json(response).await;
    assert_eq!(body.code(), code);
}

#[actix_web::test]
async fn unknown_references_name_every_offending_id() {
    let mut command = MockStudentCommand::new();
    command.expect_create().times(1).returning(|_| {
        Err(EnrollmentError::UnknownReferences {
            ids: [CourseId::new(999), CourseId::new(5)].into_iter().collect(),
        })
    });
    let app = actix_test::init_service(test_app(command, MockStudentQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/students")
        .set_json(ada_payload(&[101, 999, 5]))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["unknownCourseIds"], json!([5, 999]));
}

#[actix_web::test]
async fn create_rejects_malformed_body_without_calling_service() {
    let mut command = MockStudentCommand::new();
    command.expect_create().never();
    let app = actix_test::init_service(test_app(command, MockStudentQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/students")
        .set_json(json!({ "firstName": "Ada", "courseIds": ["x"] }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Error = actix_test::read_body_json(response).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
}

#[actix_web::test]
async fn get_returns_view_with_empty_courses_when_degraded() {
    let mut query = MockStudentQuery::new();
    query
        .expect_get()
        .with(eq(StudentId::new(1)))
        .times(1)
        .returning(|_| Ok(ada_view(&[201, 202], Vec::new())));
    let app = actix_test::init_service(test_app(MockStudentCommand::new(), query)).await;

    let request = actix_test::TestRequest::get().uri("/students/1").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["courseIds"], json!([201, 202]));
    assert_eq!(body["courses"], json!([]));
}

#[actix_web::test]
async fn get_missing_student_is_not_found() {
    let mut query = MockStudentQuery::new();
    query.expect_get().times(1).returning(|id| Err(EnrollmentError::NotFound { id }));
    let app = actix_test::init_service(test_app(MockStudentCommand::new(), query)).await;

    let request = actix_test::TestRequest::get().uri("/students/42").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Error = actix_test::read_body_json(response).await;
    assert_eq!(body.details(), Some(&json!({ "id": 42 })));
}

#[actix_web::test]
async fn get_with_non_numeric_id_is_invalid_request() {
    let mut query = MockStudentQuery::new();
    query.expect_get().never();
    let app = actix_test::init_service(test_app(MockStudentCommand::new(), query)).await;

    let request = actix_test::TestRequest::get().uri("/students/abc").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn list_returns_views_in_store_order() {
    let mut query = MockStudentQuery::new();
    query.expect_list().times(1).returning(|| {
        let mut grace = ada_view(&[], Vec::new());
        grace.id = StudentId::new(2);
        grace.email = "grace@example.com".into();
        Ok(vec![ada_view(&[101], vec![summary(101, "Algebra")]), grace])
    });
    let app = actix_test::init_service(test_app(MockStudentCommand::new(), query)).await;

    let request = actix_test::TestRequest::get().uri("/students").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<StudentView> = actix_test::read_body_json(response).await;
    let ids: Vec<i64> = body.iter().map(|view| view.id.get()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[actix_web::test]
async fn update_passes_path_id_and_draft() {
    let mut command = MockStudentCommand::new();
    command
        .expect_update()
        .withf(|id, draft| *id == StudentId::new(1) && draft.course_ids.is_empty())
        .times(1)
        .returning(|_, _| Ok(ada_view(&[], Vec::new())));
    let app = actix_test::init_service(test_app(command, MockStudentQuery::new())).await;

    let request = actix_test::TestRequest::put()
        .uri("/students/1")
        .set_json(ada_payload(&[]))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case(Ok(()), StatusCode::NO_CONTENT)]
#[case(Err(EnrollmentError::NotFound { id: StudentId::new(9) }), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_maps_outcome_to_status(
    #[case] outcome: Result<(), EnrollmentError>,
    #[case] status: StatusCode,
) {
    let mut command = MockStudentCommand::new();
    command
        .expect_delete()
        .with(eq(StudentId::new(9)))
        .times(1)
        .returning(move |_| outcome.clone());
    let app = actix_test::init_service(test_app(command, MockStudentQuery::new())).await;

    let request = actix_test::TestRequest::delete()
        .uri("/students/9")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
}
