//! Driving ports for reading and editing the course catalog.

use async_trait::async_trait;

use crate::domain::{CourseDetail, CourseDraft, CourseId, CourseSummary, Error, UserId};

/// Read side of the catalog.
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Every course as `{id, title}` in creation order.
    async fn list_courses(&self) -> Result<Vec<CourseSummary>, Error>;

    /// One course with owner, reviews and review authors resolved.
    async fn fetch_course(&self, id: &CourseId) -> Result<CourseDetail, Error>;
}

/// Write side of the catalog.
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Create a course owned by `owner`.
    async fn create_course(&self, owner: &UserId, draft: CourseDraft) -> Result<CourseId, Error>;

    /// Replace the editable content of a course owned by `actor`.
    async fn update_course(
        &self,
        actor: &UserId,
        id: &CourseId,
        draft: CourseDraft,
    ) -> Result<(), Error>;
}
