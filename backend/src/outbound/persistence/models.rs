//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{courses, student_course_enrollments, students};

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Insertable struct for creating student records; the id comes from
/// `BIGSERIAL`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

/// Changeset struct for overwriting student identity fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = student_course_enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub student_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = student_course_enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub student_id: i64,
    pub course_id: i64,
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
pub(crate) struct CourseChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
}
