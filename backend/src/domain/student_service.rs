//! Student record orchestration.
//!
//! Composes the student repository with reference validation (hard, on
//! writes) and enrollment enrichment (soft, on reads). Every mutating
//! operation finishes all checks before issuing its single repository write.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::info;

use crate::domain::ports::{StudentCommand, StudentQuery, StudentRepository};
use crate::domain::{
    EnrollmentEnricher, EnrollmentError, ReferenceValidator, Student, StudentDraft, StudentId,
    StudentView,
};

/// Student service implementing the student driving ports.
#[derive(Clone)]
pub struct StudentService<R> {
    students: Arc<R>,
    validator: ReferenceValidator,
    enricher: EnrollmentEnricher,
}

impl<R> StudentService<R> {
    /// Compose the student store with write-time validation and read-time
    /// enrichment.
    pub fn new(
        students: Arc<R>,
        validator: ReferenceValidator,
        enricher: EnrollmentEnricher,
    ) -> Self {
        Self {
            students,
            validator,
            enricher,
        }
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository,
{
    async fn load(&self, id: StudentId) -> Result<Student, EnrollmentError> {
        self.students
            .find_by_id(id)
            .await?
            .ok_or(EnrollmentError::NotFound { id })
    }

    /// Reject `email` if it belongs to a student other than `owner`.
    async fn ensure_email_available(
        &self,
        email: &str,
        owner: Option<StudentId>,
    ) -> Result<(), EnrollmentError> {
        match self.students.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(EnrollmentError::DuplicateEmail {
                email: email.to_owned(),
            }),
            _ => Ok(()),
        }
    }

    async fn view(&self, student: Student) -> StudentView {
        let courses = self.enricher.enrich(&student.course_ids).await;
        student.into_view(courses)
    }
}

#[async_trait]
impl<R> StudentCommand for StudentService<R>
where
    R: StudentRepository,
{
    async fn create(&self, draft: StudentDraft) -> Result<StudentView, EnrollmentError> {
        self.ensure_email_available(&draft.email, None).await?;
        self.validator.validate(&draft.course_ids).await?;

        let student = self.students.insert(&draft).await?;
        info!(student_id = %student.id, courses = student.course_ids.len(), "student created");
        Ok(self.view(student).await)
    }

    async fn update(
        &self,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<StudentView, EnrollmentError> {
        let existing = self.load(id).await?;
        if draft.email != existing.email {
            self.ensure_email_available(&draft.email, Some(id)).await?;
        }
        self.validator.validate(&draft.course_ids).await?;

        let student = self
            .students
            .update(&Student::from_draft(id, draft))
            .await?;
        info!(student_id = %id, "student updated");
        Ok(self.view(student).await)
    }

    async fn delete(&self, id: StudentId) -> Result<(), EnrollmentError> {
        if !self.students.exists_by_id(id).await? {
            return Err(EnrollmentError::NotFound { id });
        }
        self.students.delete(id).await?;
        info!(student_id = %id, "student deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> StudentQuery for StudentService<R>
where
    R: StudentRepository,
{
    async fn list(&self) -> Result<Vec<StudentView>, EnrollmentError> {
        let students = self.students.list().await?;
        Ok(join_all(students.into_iter().map(|student| self.view(student))).await)
    }

    async fn get(&self, id: StudentId) -> Result<StudentView, EnrollmentError> {
        let student = self.load(id).await?;
        Ok(self.view(student).await)
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
