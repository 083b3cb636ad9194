//! Driving port for posting and removing reviews.

use async_trait::async_trait;

use crate::domain::{CourseId, Error, ReviewDraft, ReviewId, UserId};

/// Driving port for adding and removing reviews.
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Post a review by `author` on `course`.
    async fn create_review(
        &self,
        author: &UserId,
        course: &CourseId,
        draft: ReviewDraft,
    ) -> Result<ReviewId, Error>;

    /// Remove `review` from `course` on behalf of `actor`.
    async fn delete_review(
        &self,
        actor: &UserId,
        course: &CourseId,
        review: &ReviewId,
    ) -> Result<(), Error>;
}
