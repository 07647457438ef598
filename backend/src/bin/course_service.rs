//! Course service entry-point: loads settings, prepares the store, and
//! serves the course REST endpoints including the id lookup.

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use enrollment::inbound::http::health::HealthState;
use enrollment::outbound::persistence::{DbPool, run_migrations};
use enrollment::server::{ServerConfig, create_course_server};
use enrollment::settings::CourseServiceSettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CourseServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load course service settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr);

    match settings.pool_config()? {
        Some(pool_config) => {
            run_migrations(pool_config.database_url())
                .await
                .wrap_err("failed to apply database migrations")?;
            info!(max_connections = pool_config.max_size(), "connecting to database");
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; course records are kept in memory"),
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_course_server(health_state.clone(), config)?;
    info!(%bind_addr, "course service listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("course_service")
        .endpoint("/metrics")
        .build()
        .map_err(|err| eyre!("failed to configure Prometheus metrics: {err}"))
}
