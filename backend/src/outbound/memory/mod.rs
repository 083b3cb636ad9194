//! In-memory adapter implementing the user, course and review repositories.
//!
//! One mutex guards all three collections so uniqueness checks and writes
//! happen atomically. Used when no database URL is configured and by tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, ReviewRepository, ReviewRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Course, CourseContent, CourseId, CourseSummary, EmailAddress, Review, ReviewId, User, UserId,
};

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, User>,
    /// Courses in creation order.
    courses: Vec<Course>,
    reviews: HashMap<ReviewId, Review>,
}

impl State {
    fn course_mut(&mut self, id: &CourseId) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.id == *id)
    }
}

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

const POISONED: &str = "memory store lock poisoned";

impl MemoryStore {
    fn lock(&self) -> Option<MutexGuard<'_, State>> {
        self.state.lock().ok()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        if state
            .users
            .values()
            .any(|u| u.email_address == user.email_address)
        {
            return Err(UserPersistenceError::duplicate_email(
                user.email_address.as_ref(),
            ));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state
            .users
            .values()
            .find(|u| u.email_address == *email)
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn list_summaries(&self) -> Result<Vec<CourseSummary>, CourseRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| CourseRepositoryError::query(POISONED))?;
        Ok(state.courses.iter().map(Course::summary).collect())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| CourseRepositoryError::query(POISONED))?;
        Ok(state.courses.iter().find(|c| c.id == *id).cloned())
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| CourseRepositoryError::query(POISONED))?;
        state.courses.push(course.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: &CourseId,
        content: &CourseContent,
    ) -> Result<bool, CourseRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| CourseRepositoryError::query(POISONED))?;
        Ok(state
            .course_mut(id)
            .map(|course| course.content = content.clone())
            .is_some())
    }

    async fn attach_review(
        &self,
        id: &CourseId,
        review: &ReviewId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| CourseRepositoryError::query(POISONED))?;
        let Some(course) = state.course_mut(id) else {
            return Ok(false);
        };
        if !course.reviews.contains(review) {
            course.reviews.push(*review);
        }
        Ok(true)
    }

    async fn detach_review(
        &self,
        id: &CourseId,
        review: &ReviewId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| CourseRepositoryError::query(POISONED))?;
        let Some(course) = state.course_mut(id) else {
            return Ok(false);
        };
        let before = course.reviews.len();
        course.reviews.retain(|r| r != review);
        Ok(course.reviews.len() != before)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| ReviewRepositoryError::query(POISONED))?;
        if state
            .reviews
            .values()
            .any(|r| r.course == review.course && r.author == review.author)
        {
            return Err(ReviewRepositoryError::duplicate_review(
                review.course.to_string(),
                review.author.to_string(),
            ));
        }
        state.reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| ReviewRepositoryError::query(POISONED))?;
        Ok(state.reviews.get(id).cloned())
    }

    async fn find_many(&self, ids: &[ReviewId]) -> Result<Vec<Review>, ReviewRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| ReviewRepositoryError::query(POISONED))?;
        Ok(ids
            .iter()
            .filter_map(|id| state.reviews.get(id).cloned())
            .collect())
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| ReviewRepositoryError::query(POISONED))?;
        Ok(state.reviews.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rating, Step};
    use crate::test_support::fixture_timestamp;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::default()
    }

    fn user(email: &str) -> User {
        User {
            id: UserId::random(),
            full_name: "Joe Smith".into(),
            email_address: EmailAddress::new(email).expect("valid email"),
            password_hash: "fixture$password".into(),
        }
    }

    fn course(title: &str) -> Course {
        Course {
            id: CourseId::random(),
            owner: UserId::random(),
            content: CourseContent {
                title: title.into(),
                description: "Description".into(),
                estimated_time: None,
                materials_needed: None,
                steps: vec![Step {
                    step_number: 1,
                    title: "Step".into(),
                    description: "Do it".into(),
                }],
            },
            reviews: Vec::new(),
        }
    }

    fn review(course: CourseId, author: UserId) -> Review {
        Review {
            id: ReviewId::random(),
            course,
            author,
            posted_on: fixture_timestamp(),
            rating: Rating::from_input(4.0).expect("valid rating"),
            review: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected(store: MemoryStore) {
        UserRepository::insert(&store, &user("joe@smith.com"))
            .await
            .expect("first insert");
        let err = UserRepository::insert(&store, &user("joe@smith.com"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserPersistenceError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn courses_list_in_creation_order(store: MemoryStore) {
        for title in ["First", "Second", "Third"] {
            CourseRepository::insert(&store, &course(title))
                .await
                .expect("insert");
        }
        let titles: Vec<_> = store
            .list_summaries()
            .await
            .expect("list")
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[rstest]
    #[tokio::test]
    async fn review_references_attach_once_and_detach(store: MemoryStore) {
        let stored = course("Bookcase");
        CourseRepository::insert(&store, &stored)
            .await
            .expect("insert");
        let review_id = ReviewId::random();

        assert!(store.attach_review(&stored.id, &review_id).await.expect("attach"));
        assert!(store.attach_review(&stored.id, &review_id).await.expect("attach"));
        let found = CourseRepository::find_by_id(&store, &stored.id)
            .await
            .expect("find")
            .expect("course");
        assert_eq!(found.reviews, vec![review_id]);

        assert!(store.detach_review(&stored.id, &review_id).await.expect("detach"));
        assert!(!store.detach_review(&stored.id, &review_id).await.expect("detach"));
        assert!(!store
            .attach_review(&CourseId::random(), &review_id)
            .await
            .expect("attach"));
    }

    #[rstest]
    #[tokio::test]
    async fn one_review_per_author_and_course(store: MemoryStore) {
        let course_id = CourseId::random();
        let author = UserId::random();
        ReviewRepository::insert(&store, &review(course_id, author))
            .await
            .expect("first review");
        let err = ReviewRepository::insert(&store, &review(course_id, author))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, ReviewRepositoryError::DuplicateReview { .. }));
        ReviewRepository::insert(&store, &review(CourseId::random(), author))
            .await
            .expect("other course");
    }

    #[rstest]
    #[tokio::test]
    async fn find_many_keeps_requested_order(store: MemoryStore) {
        let first = review(CourseId::random(), UserId::random());
        let second = review(CourseId::random(), UserId::random());
        ReviewRepository::insert(&store, &first).await.expect("insert");
        ReviewRepository::insert(&store, &second).await.expect("insert");

        let found = ReviewRepository::find_many(&store, &[second.id, ReviewId::random(), first.id])
            .await
            .expect("find many");
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(store.delete(&first.id).await.expect("delete"));
        assert!(!store.delete(&first.id).await.expect("delete"));
    }
}
