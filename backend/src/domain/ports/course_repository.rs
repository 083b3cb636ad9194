//! Port for course persistence.
//!
//! Courses keep their review references as an ordered set; adapters append
//! on [`CourseRepository::attach_review`] and never reorder.

use async_trait::async_trait;

use crate::domain::{Course, CourseContent, CourseId, CourseSummary, ReviewId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
    }
}

/// Storage for courses and their ordered review references.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses as `{id, title}` in creation order.
    async fn list_summaries(&self) -> Result<Vec<CourseSummary>, CourseRepositoryError>;

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Replace the editable fields. Returns `false` when the course is
    /// unknown.
    async fn update_content(
        &self,
        id: &CourseId,
        content: &CourseContent,
    ) -> Result<bool, CourseRepositoryError>;

    /// Append `review` to the course's review set. Returns `false` when the
    /// course is unknown. Attaching a reference twice is a no-op.
    async fn attach_review(
        &self,
        id: &CourseId,
        review: &ReviewId,
    ) -> Result<bool, CourseRepositoryError>;

    /// Remove `review` from the course's review set. Returns `false` when
    /// nothing was removed.
    async fn detach_review(
        &self,
        id: &CourseId,
        review: &ReviewId,
    ) -> Result<bool, CourseRepositoryError>;
}
