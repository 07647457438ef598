//! In-memory `CourseRepository`.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<CourseId, Course>,
}

impl State {
    fn title_taken(&self, title: &str, except: Option<CourseId>) -> bool {
        self.rows
            .values()
            .any(|row| row.title == title && Some(row.id) != except)
    }
}

/// Course store backed by a `BTreeMap`, iterated in identifier order.
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    state: RwLock<State>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<CourseId>,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.rows.get(id).cloned())
            .collect())
    }

    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut state = self.state.write().await;
        if state.title_taken(draft.title(), None) {
            return Err(CourseRepositoryError::duplicate_title(draft.title()));
        }
        state.next_id += 1;
        let course = Course::from_draft(CourseId::new(state.next_id), draft.clone());
        state.rows.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, CourseRepositoryError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&id) {
            return Err(CourseRepositoryError::not_found(id));
        }
        if state.title_taken(draft.title(), Some(id)) {
            return Err(CourseRepositoryError::duplicate_title(draft.title()));
        }
        let course = Course::from_draft(id, draft.clone());
        state.rows.insert(id, course.clone());
        Ok(course)
    }

    async fn delete(&self, id: CourseId) -> Result<(), CourseRepositoryError> {
        let mut state = self.state.write().await;
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CourseRepositoryError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> CourseDraft {
        CourseDraft::new(title, "Sample").expect("valid draft")
    }

    #[tokio::test]
    async fn find_by_ids_skips_unknown_ids() {
        let repo = InMemoryCourseRepository::new();
        let algebra = repo.insert(&draft("Algebra")).await.expect("insert");

        let found = repo
            .find_by_ids(&BTreeSet::from([algebra.id, CourseId::new(999)]))
            .await
            .expect("lookup");
        assert_eq!(found, vec![algebra]);
    }

    #[tokio::test]
    async fn titles_are_unique_across_insert_and_update() {
        let repo = InMemoryCourseRepository::new();
        repo.insert(&draft("Algebra")).await.expect("insert");
        let biology = repo.insert(&draft("Biology")).await.expect("insert");

        assert_eq!(
            repo.insert(&draft("Algebra")).await,
            Err(CourseRepositoryError::duplicate_title("Algebra"))
        );
        assert_eq!(
            repo.update(biology.id, &draft("Algebra")).await,
            Err(CourseRepositoryError::duplicate_title("Algebra"))
        );
        repo.update(biology.id, &draft("Biology"))
            .await
            .expect("own title is fine");
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = InMemoryCourseRepository::new();
        let missing = CourseId::new(7);
        assert_eq!(
            repo.update(missing, &draft("Algebra")).await,
            Err(CourseRepositoryError::not_found(missing))
        );
        assert_eq!(
            repo.delete(missing).await,
            Err(CourseRepositoryError::not_found(missing))
        );
    }
}
