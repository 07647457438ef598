//! In-memory `StudentRepository`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Student, StudentDraft, StudentId};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<StudentId, Student>,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<StudentId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email == email && Some(row.id) != except)
    }
}

/// Student store backed by a `BTreeMap`, iterated in identifier order.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    state: RwLock<State>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError> {
        let state = self.state.read().await;
        Ok(state.rows.values().find(|row| row.email == email).cloned())
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        Ok(self.state.read().await.rows.contains_key(&id))
    }

    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError> {
        let mut state = self.state.write().await;
        if state.email_taken(&draft.email, None) {
            return Err(StudentRepositoryError::duplicate_email(draft.email.as_str()));
        }
        state.next_id += 1;
        let student = Student::from_draft(StudentId::new(state.next_id), draft.clone());
        state.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, student: &Student) -> Result<Student, StudentRepositoryError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&student.id) {
            return Err(StudentRepositoryError::not_found(student.id));
        }
        if state.email_taken(&student.email, Some(student.id)) {
            return Err(StudentRepositoryError::duplicate_email(student.email.as_str()));
        }
        state.rows.insert(student.id, student.clone());
        Ok(student.clone())
    }

    async fn delete(&self, id: StudentId) -> Result<(), StudentRepositoryError> {
        let mut state = self.state.write().await;
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StudentRepositoryError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::CourseId;

    fn draft(email: &str) -> StudentDraft {
        StudentDraft {
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            email: email.to_owned(),
            course_ids: BTreeSet::from([CourseId::new(1)]),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = InMemoryStudentRepository::new();
        let first = repo.insert(&draft("a@x.com")).await.expect("insert");
        let second = repo.insert(&draft("b@x.com")).await.expect("insert");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn insert_enforces_unique_email() {
        let repo = InMemoryStudentRepository::new();
        repo.insert(&draft("a@x.com")).await.expect("insert");
        let err = repo.insert(&draft("a@x.com")).await.expect_err("duplicate");
        assert_eq!(err, StudentRepositoryError::duplicate_email("a@x.com"));
    }

    #[tokio::test]
    async fn update_allows_own_email_but_not_anothers() {
        let repo = InMemoryStudentRepository::new();
        let a = repo.insert(&draft("a@x.com")).await.expect("insert");
        repo.insert(&draft("b@x.com")).await.expect("insert");

        repo.update(&a).await.expect("own email is fine");

        let mut stolen = a.clone();
        stolen.email = "b@x.com".to_owned();
        let err = repo.update(&stolen).await.expect_err("taken");
        assert_eq!(err, StudentRepositoryError::duplicate_email("b@x.com"));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = InMemoryStudentRepository::new();
        let a = repo.insert(&draft("a@x.com")).await.expect("insert");
        repo.delete(a.id).await.expect("delete");
        assert!(!repo.exists_by_id(a.id).await.expect("exists"));
        assert_eq!(
            repo.delete(a.id).await,
            Err(StudentRepositoryError::not_found(a.id))
        );
    }
}
