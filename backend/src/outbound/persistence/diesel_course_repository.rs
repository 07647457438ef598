//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CourseChanges, CourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the course repository port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    map_basic_pool_error(error, CourseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_basic_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

fn map_write_error(error: diesel::result::Error, title: &str) -> CourseRepositoryError {
    if is_unique_violation(&error) {
        CourseRepositoryError::duplicate_title(title)
    } else {
        map_diesel_error(error)
    }
}

fn row_to_course(row: CourseRow) -> Course {
    Course {
        id: CourseId::new(row.id),
        title: row.title,
        description: row.description,
    }
}

fn changes(draft: &CourseDraft) -> CourseChanges<'_> {
    CourseChanges {
        title: draft.title(),
        description: draft.description(),
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .order(courses::id.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_course).collect())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = courses::table
            .find(id.get())
            .select(CourseRow::as_select())
            .first::<CourseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_course))
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<CourseId>,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let rows: Vec<CourseRow> = courses::table
            .filter(courses::id.eq_any(&raw))
            .order(courses::id.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_course).collect())
    }

    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CourseRow = diesel::insert_into(courses::table)
            .values(&changes(draft))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft.title()))?;
        Ok(row_to_course(row))
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CourseRow = diesel::update(courses::table.find(id.get()))
            .set(&changes(draft))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                diesel::result::Error::NotFound => CourseRepositoryError::not_found(id),
                other => map_write_error(other, draft.title()),
            })?;
        Ok(row_to_course(row))
    }

    async fn delete(&self, id: CourseId) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(courses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(CourseRepositoryError::not_found(id));
        }
        Ok(())
    }
}
