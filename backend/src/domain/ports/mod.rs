//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call.
//! Driven ports (repositories, the course lookup, address resolution,
//! metrics) are what the domain needs from outbound adapters. Each driven
//! port exposes its own error enum so adapters map failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod course_command;
mod course_lookup;
mod course_lookup_metrics;
mod course_query;
mod course_repository;
mod service_address;
mod student_command;
mod student_query;
mod student_repository;

#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_lookup::MockCourseLookup;
pub use course_lookup::{CourseLookup, CourseLookupError};
#[cfg(test)]
pub use course_lookup_metrics::MockCourseLookupMetrics;
pub use course_lookup_metrics::{
    CourseLookupMetrics, CourseLookupMetricsError, LookupOutcome, LookupPurpose,
    NoOpCourseLookupMetrics,
};
#[cfg(test)]
pub use course_query::MockCourseQuery;
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use service_address::MockServiceAddressResolver;
pub use service_address::{COURSE_SERVICE, ServiceAddressError, ServiceAddressResolver};
#[cfg(test)]
pub use student_command::MockStudentCommand;
pub use student_command::StudentCommand;
#[cfg(test)]
pub use student_query::MockStudentQuery;
pub use student_query::StudentQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
