//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! A student spans two tables: identity fields in `students` and the
//! enrolled course ids in `student_course_enrollments`. Inserts and updates
//! touch both inside one transaction.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{CourseId, Student, StudentDraft, StudentId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{EnrollmentRow, NewEnrollmentRow, NewStudentRow, StudentRow, StudentUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{student_course_enrollments, students};

/// Diesel-backed implementation of the student repository port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    map_basic_pool_error(error, StudentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> StudentRepositoryError {
    map_basic_diesel_error(
        error,
        StudentRepositoryError::query,
        StudentRepositoryError::connection,
    )
}

/// Map write failures, turning the email unique constraint into
/// `DuplicateEmail`.
fn map_write_error(error: diesel::result::Error, email: &str) -> StudentRepositoryError {
    if is_unique_violation(&error) {
        StudentRepositoryError::duplicate_email(email)
    } else {
        map_diesel_error(error)
    }
}

fn enrollment_rows(id: i64, course_ids: &BTreeSet<CourseId>) -> Vec<NewEnrollmentRow> {
    course_ids
        .iter()
        .map(|course_id| NewEnrollmentRow {
            student_id: id,
            course_id: course_id.get(),
        })
        .collect()
}

fn row_to_student(row: StudentRow, course_ids: BTreeSet<CourseId>) -> Student {
    let StudentRow {
        id,
        first_name,
        last_name,
        email,
    } = row;
    Student {
        id: StudentId::new(id),
        first_name,
        last_name,
        email,
        course_ids,
    }
}

/// Load enrollments for the given students, grouped by student id.
async fn load_enrollments(
    conn: &mut AsyncPgConnection,
    student_ids: &[i64],
) -> Result<BTreeMap<i64, BTreeSet<CourseId>>, diesel::result::Error> {
    let rows: Vec<EnrollmentRow> = student_course_enrollments::table
        .filter(student_course_enrollments::student_id.eq_any(student_ids))
        .select(EnrollmentRow::as_select())
        .load(conn)
        .await?;

    let mut grouped: BTreeMap<i64, BTreeSet<CourseId>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry(row.student_id)
            .or_default()
            .insert(CourseId::new(row.course_id));
    }
    Ok(grouped)
}

async fn attach_enrollments(
    conn: &mut AsyncPgConnection,
    row: Option<StudentRow>,
) -> Result<Option<Student>, diesel::result::Error> {
    let Some(row) = row else {
        return Ok(None);
    };
    let mut grouped = load_enrollments(conn, &[row.id]).await?;
    let course_ids = grouped.remove(&row.id).unwrap_or_default();
    Ok(Some(row_to_student(row, course_ids)))
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut grouped = load_enrollments(&mut conn, &ids)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let course_ids = grouped.remove(&row.id).unwrap_or_default();
                row_to_student(row, course_ids)
            })
            .collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = students::table
            .filter(students::id.eq(id.get()))
            .select(StudentRow::as_select())
            .first::<StudentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        attach_enrollments(&mut conn, row)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = students::table
            .filter(students::email.eq(email))
            .select(StudentRow::as_select())
            .first::<StudentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        attach_enrollments(&mut conn, row)
            .await
            .map_err(map_diesel_error)
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            students::table.filter(students::id.eq(id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewStudentRow {
            first_name: draft.first_name.as_str(),
            last_name: draft.last_name.as_str(),
            email: draft.email.as_str(),
        };
        let course_ids = &draft.course_ids;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let row: StudentRow = diesel::insert_into(students::table)
                        .values(&new_row)
                        .returning(StudentRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let enrollments = enrollment_rows(row.id, course_ids);
                    if !enrollments.is_empty() {
                        diesel::insert_into(student_course_enrollments::table)
                            .values(&enrollments)
                            .execute(conn)
                            .await?;
                    }
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, &draft.email))?;

        Ok(row_to_student(row, draft.course_ids.clone()))
    }

    async fn update(&self, student: &Student) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = student.id.get();
        let changes = StudentUpdate {
            first_name: student.first_name.as_str(),
            last_name: student.last_name.as_str(),
            email: student.email.as_str(),
        };
        let course_ids = &student.course_ids;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let row: StudentRow = diesel::update(students::table.find(id))
                        .set(&changes)
                        .returning(StudentRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::delete(
                        student_course_enrollments::table
                            .filter(student_course_enrollments::student_id.eq(id)),
                    )
                    .execute(conn)
                    .await?;

                    let enrollments = enrollment_rows(id, course_ids);
                    if !enrollments.is_empty() {
                        diesel::insert_into(student_course_enrollments::table)
                            .values(&enrollments)
                            .execute(conn)
                            .await?;
                    }
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| match err {
                diesel::result::Error::NotFound => StudentRepositoryError::not_found(student.id),
                other => map_write_error(other, &student.email),
            })?;

        Ok(row_to_student(row, student.course_ids.clone()))
    }

    async fn delete(&self, id: StudentId) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Enrollment rows go with the student via ON DELETE CASCADE.
        let deleted = diesel::delete(students::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(StudentRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for student repository error mapping.

    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let err = map_write_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("students_email_key".to_owned()),
            ),
            "a@x.com",
        );
        assert_eq!(err, StudentRepositoryError::duplicate_email("a@x.com"));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, StudentRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn enrollment_rows_follow_set_order() {
        let ids: BTreeSet<CourseId> = [3, 1, 2].into_iter().map(CourseId::new).collect();
        let rows = enrollment_rows(9, &ids);
        let course_ids: Vec<_> = rows.iter().map(|row| row.course_id).collect();
        assert_eq!(course_ids, vec![1, 2, 3]);
        assert!(rows.iter().all(|row| row.student_id == 9));
    }
}
