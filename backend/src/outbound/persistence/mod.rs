//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the student and course repository ports,
//! backed by PostgreSQL via `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One write point**: each mutating repository call is a single
//!   statement or a single transaction.
//!
//! # Example
//!
//! ```ignore
//! use enrollment::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/students")).await?;
//! let repo = DieselStudentRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_course_repository;
mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
