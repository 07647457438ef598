//! Service configuration loaded via OrthoConfig.
//!
//! Each binary layers CLI flags over environment variables over optional
//! config files. Unset values fall back to the defaults below; a missing
//! database URL selects the in-memory stores and leaves the pool unsized.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_STUDENT_BIND_ADDR: &str = "0.0.0.0:8082";
const DEFAULT_COURSE_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_COURSE_SERVICE_URL: &str = "http://127.0.0.1:8081";

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid course service URL {value}: {message}")]
    CourseServiceUrl { value: String, message: String },
    #[error("course lookup timeout must be at least 1 ms")]
    ZeroTimeout,
    #[error("database pool needs at least one connection")]
    ZeroPoolSize,
}

fn parse_bind_addr(raw: Option<&str>, default: &str) -> Result<SocketAddr, SettingsError> {
    let value = raw.unwrap_or(default);
    value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
        value: value.to_owned(),
        message: err.to_string(),
    })
}

fn pool_config(
    database_url: Option<&str>,
    max_connections: u32,
) -> Result<Option<PoolConfig>, SettingsError> {
    let Some(url) = database_url else {
        return Ok(None);
    };
    match max_connections {
        0 => Err(SettingsError::ZeroPoolSize),
        size => Ok(Some(PoolConfig::new(url).with_max_size(size))),
    }
}

/// Student service settings (`STUDENT_SERVICE_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENT_SERVICE")]
pub struct StudentServiceSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL for the student store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Base URL registered for the logical `course-service` name.
    pub course_service_url: Option<String>,
    /// Upper bound for one course lookup round trip.
    #[ortho_config(default = 3000)]
    pub course_lookup_timeout_ms: u64,
}

impl StudentServiceSettings {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref(), DEFAULT_STUDENT_BIND_ADDR)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Pool settings for the configured database, or `None` for the
    /// in-memory store.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroPoolSize`] when the pool would be empty.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        pool_config(self.database_url(), self.db_max_connections)
    }

    /// Return the course service base URL, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::CourseServiceUrl`] when the value does not
    /// parse as a URL.
    pub fn course_service_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .course_service_url
            .as_deref()
            .unwrap_or(DEFAULT_COURSE_SERVICE_URL);
        Url::parse(value).map_err(|err| SettingsError::CourseServiceUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the course lookup timeout, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn course_lookup_timeout(&self) -> Result<Duration, SettingsError> {
        match self.course_lookup_timeout_ms {
            0 => Err(SettingsError::ZeroTimeout),
            millis => Ok(Duration::from_millis(millis)),
        }
    }
}

/// Course service settings (`COURSE_SERVICE_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSE_SERVICE")]
pub struct CourseServiceSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL for the course store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl CourseServiceSettings {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref(), DEFAULT_COURSE_BIND_ADDR)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Pool settings for the configured database, or `None` for the
    /// in-memory store.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroPoolSize`] when the pool would be empty.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        pool_config(self.database_url(), self.db_max_connections)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_student_settings() -> StudentServiceSettings {
        StudentServiceSettings::load_from_iter([OsString::from("student-service")])
            .expect("config should load")
    }

    fn load_course_settings() -> CourseServiceSettings {
        CourseServiceSettings::load_from_iter([OsString::from("course-service")])
            .expect("config should load")
    }

    #[rstest]
    fn student_defaults_are_used_when_missing() {
        let _guard = lock_env([
            ("STUDENT_SERVICE_BIND_ADDR", None::<String>),
            ("STUDENT_SERVICE_DATABASE_URL", None::<String>),
            ("STUDENT_SERVICE_DB_MAX_CONNECTIONS", None::<String>),
            ("STUDENT_SERVICE_COURSE_SERVICE_URL", None::<String>),
            ("STUDENT_SERVICE_COURSE_LOOKUP_TIMEOUT_MS", None::<String>),
        ]);

        let settings = load_student_settings();
        assert_eq!(
            settings.bind_addr().expect("default bind addr"),
            DEFAULT_STUDENT_BIND_ADDR.parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.database_url().is_none());
        assert!(settings.pool_config().expect("pool config").is_none());
        assert_eq!(
            settings.course_service_url().expect("default url").as_str(),
            "http://127.0.0.1:8081/"
        );
        assert_eq!(
            settings.course_lookup_timeout().expect("default timeout"),
            Duration::from_secs(3)
        );
    }

    #[rstest]
    fn student_environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STUDENT_SERVICE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "STUDENT_SERVICE_DATABASE_URL",
                Some("postgres://localhost/students".to_owned()),
            ),
            ("STUDENT_SERVICE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            (
                "STUDENT_SERVICE_COURSE_SERVICE_URL",
                Some("http://courses.internal:8081/api".to_owned()),
            ),
            (
                "STUDENT_SERVICE_COURSE_LOOKUP_TIMEOUT_MS",
                Some("250".to_owned()),
            ),
        ]);

        let settings = load_student_settings();
        assert_eq!(settings.bind_addr().expect("bind addr").port(), 9000);
        let pool = settings
            .pool_config()
            .expect("pool config")
            .expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/students");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(settings.course_service_url().expect("url").path(), "/api");
        assert_eq!(
            settings.course_lookup_timeout().expect("timeout"),
            Duration::from_millis(250)
        );
    }

    #[rstest]
    fn student_rejects_zero_timeout_and_bad_addresses() {
        let _guard = lock_env([
            ("STUDENT_SERVICE_BIND_ADDR", Some("not-an-addr".to_owned())),
            (
                "STUDENT_SERVICE_DATABASE_URL",
                Some("postgres://localhost/students".to_owned()),
            ),
            ("STUDENT_SERVICE_DB_MAX_CONNECTIONS", Some("0".to_owned())),
            ("STUDENT_SERVICE_COURSE_SERVICE_URL", Some("::".to_owned())),
            ("STUDENT_SERVICE_COURSE_LOOKUP_TIMEOUT_MS", Some("0".to_owned())),
        ]);

        let settings = load_student_settings();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(matches!(
            settings.course_service_url(),
            Err(SettingsError::CourseServiceUrl { .. })
        ));
        assert!(matches!(
            settings.course_lookup_timeout(),
            Err(SettingsError::ZeroTimeout)
        ));
        assert!(matches!(
            settings.pool_config(),
            Err(SettingsError::ZeroPoolSize)
        ));
    }

    #[rstest]
    fn course_defaults_and_overrides() {
        let _guard = lock_env([
            ("COURSE_SERVICE_BIND_ADDR", None::<String>),
            (
                "COURSE_SERVICE_DATABASE_URL",
                Some("postgres://localhost/courses".to_owned()),
            ),
            ("COURSE_SERVICE_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_course_settings();
        assert_eq!(settings.bind_addr().expect("bind addr").port(), 8081);
        let pool = settings
            .pool_config()
            .expect("pool config")
            .expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/courses");
        assert_eq!(pool.max_size(), crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS);
    }

    #[rstest]
    fn course_loads_with_no_configuration() {
        let _guard = lock_env([
            ("COURSE_SERVICE_BIND_ADDR", None::<String>),
            ("COURSE_SERVICE_DATABASE_URL", None::<String>),
            ("COURSE_SERVICE_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_course_settings();
        assert_eq!(
            settings.bind_addr().expect("default bind addr"),
            DEFAULT_COURSE_BIND_ADDR.parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.database_url().is_none());
        assert!(settings.pool_config().expect("pool config").is_none());
        assert_eq!(
            settings.db_max_connections,
            crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS
        );
    }
}
