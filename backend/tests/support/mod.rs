//! Shared helpers for the HTTP integration suites.
#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpServer, test as actix_test, web};
use enrollment::domain::ports::{COURSE_SERVICE, NoOpCourseLookupMetrics};
use enrollment::inbound::http::health::HealthState;
use enrollment::inbound::http::state::StudentHttpState;
use enrollment::outbound::StaticServiceRegistry;
use enrollment::outbound::course_lookup::HttpCourseLookup;
use enrollment::server::{build_course_app, build_course_state, build_student_app, build_student_state};
use serde_json::{Value, json};
use url::Url;
use wiremock::{Request as MockRequest, Respond, ResponseTemplate};

pub const LOOKUP_TIMEOUT: Duration = Duration::from_millis(500);

/// Student state backed by the in-memory store and a course service at
/// `course_base`.
pub fn student_state(course_base: &Url, timeout: Duration) -> web::Data<StudentHttpState> {
    let registry = StaticServiceRegistry::new().with_service(COURSE_SERVICE, course_base.clone());
    let lookup =
        HttpCourseLookup::new(Arc::new(registry), timeout).expect("lookup client builds");
    build_student_state(None, Arc::new(lookup), Arc::new(NoOpCourseLookupMetrics))
}

/// Initialise an in-process student service pointing at `course_base`.
pub async fn student_app(
    course_base: &Url,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(build_student_app(
        web::Data::new(HealthState::new()),
        student_state(course_base, LOOKUP_TIMEOUT),
    ))
    .await
}

/// Bind a real course service on an ephemeral port and return its base URL.
///
/// The server runs on the current actix system until the test ends.
pub fn spawn_course_service() -> std::io::Result<Url> {
    let health = web::Data::new(HealthState::new());
    let state = build_course_state(None);
    let server = HttpServer::new(move || build_course_app(health.clone(), state.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))?;
    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| std::io::Error::other("course service bound no address"))?;
    actix_rt::spawn(server.run());
    Url::parse(&format!("http://{addr}")).map_err(std::io::Error::other)
}

/// JSON body for a student create or update request.
pub fn student_body(email: &str, course_ids: &[i64]) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "courseIds": course_ids,
    })
}

/// Wiremock responder that answers lookups from a fixed course list.
///
/// Unknown ids are omitted from the response, like the real course service.
#[derive(Clone)]
pub struct CourseCatalogue {
    courses: Vec<(i64, &'static str)>,
}

impl CourseCatalogue {
    pub fn new(courses: &[(i64, &'static str)]) -> Self {
        Self {
            courses: courses.to_vec(),
        }
    }
}

impl Respond for CourseCatalogue {
    fn respond(&self, request: &MockRequest) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(400);
        };
        let requested: Vec<i64> = body
            .get("courseIds")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default();
        let found: Vec<Value> = self
            .courses
            .iter()
            .filter(|(id, _)| requested.contains(id))
            .map(|(id, title)| {
                json!({
                    "id": id,
                    "title": title,
                    "description": format!("{title} description"),
                })
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(found)
    }
}
