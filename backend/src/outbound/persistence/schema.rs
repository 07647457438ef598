//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Enrollments
//! reference students with `ON DELETE CASCADE` but carry no foreign key to
//! `courses`: the course table belongs to the course service and may live in
//! another database.

diesel::table! {
    /// Course records owned by the course service.
    courses (id) {
        id -> Int8,
        /// Unique, non-blank title.
        title -> Varchar,
        description -> Text,
    }
}

diesel::table! {
    /// Student identity fields.
    students (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique across all students (`students_email_key`).
        email -> Varchar,
    }
}

diesel::table! {
    /// Set of course ids per student; the composite key collapses duplicates.
    student_course_enrollments (student_id, course_id) {
        student_id -> Int8,
        course_id -> Int8,
    }
}

diesel::joinable!(student_course_enrollments -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(students, student_course_enrollments);
