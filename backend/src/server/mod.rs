//! Server construction and middleware wiring for both services.
//!
//! The student and course services share the same middleware stack (trace
//! ids, extractor error handling, health probes, optional Prometheus) and
//! differ only in the routes and state they register.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{CourseLookupConfig, ServerConfig};
pub use state_builders::{build_course_state, build_student_state};

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{CourseApiDoc, StudentApiDoc};
use crate::domain::ports::{CourseLookup, CourseLookupMetrics, NoOpCourseLookupMetrics};
use crate::inbound::http::error::{json_config, path_config};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::{CourseHttpState, StudentHttpState};
use crate::inbound::http::{courses, students};
use crate::outbound::course_lookup::HttpCourseLookup;
#[cfg(feature = "metrics")]
use crate::outbound::metrics::PrometheusCourseLookupMetrics;

/// Build the student service application.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use actix_web::web;
/// use enrollment::domain::ports::NoOpCourseLookupMetrics;
/// use enrollment::inbound::http::health::HealthState;
/// use enrollment::outbound::StaticServiceRegistry;
/// use enrollment::outbound::course_lookup::HttpCourseLookup;
/// use enrollment::server::{build_student_app, build_student_state};
///
/// let registry = StaticServiceRegistry::new();
/// let lookup = HttpCourseLookup::new(Arc::new(registry), Duration::from_secs(3))
///     .expect("client builds");
/// let state = build_student_state(None, Arc::new(lookup), Arc::new(NoOpCourseLookupMetrics));
/// let _app = build_student_app(web::Data::new(HealthState::new()), state);
/// ```
pub fn build_student_app(
    health_state: web::Data<HealthState>,
    state: web::Data<StudentHttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .configure(students::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", StudentApiDoc::openapi()),
    );

    app
}

/// Build the course service application.
pub fn build_course_app(
    health_state: web::Data<HealthState>,
    state: web::Data<CourseHttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .configure(courses::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", CourseApiDoc::openapi()),
    );

    app
}

/// Select the lookup metrics recorder.
///
/// Prometheus counters are registered when the feature is enabled and a
/// Prometheus middleware was configured; otherwise lookups go unrecorded.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
#[cfg(feature = "metrics")]
fn build_lookup_metrics(config: &ServerConfig) -> std::io::Result<Arc<dyn CourseLookupMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusCourseLookupMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("course lookup metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpCourseLookupMetrics)),
    }
}

#[cfg(not(feature = "metrics"))]
fn build_lookup_metrics(_config: &ServerConfig) -> std::io::Result<Arc<dyn CourseLookupMetrics>> {
    Ok(Arc::new(NoOpCourseLookupMetrics))
}

/// Construct the student service HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when the lookup client cannot be built,
/// metrics registration fails, or binding the socket fails.
pub fn create_student_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    lookup: CourseLookupConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let course_lookup: Arc<dyn CourseLookup> = Arc::new(
        HttpCourseLookup::new(lookup.resolver, lookup.timeout).map_err(|e| {
            std::io::Error::other(format!("course lookup client construction failed: {e}"))
        })?,
    );
    let lookup_metrics = build_lookup_metrics(&config)?;
    let state = build_student_state(config.db_pool.as_ref(), course_lookup, lookup_metrics);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_student_app(server_health_state.clone(), state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Construct the course service HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_course_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let state = build_course_state(config.db_pool.as_ref());
    let ServerConfig {
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_course_app(server_health_state.clone(), state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
