//! Port for review persistence.

use async_trait::async_trait;

use crate::domain::{Review, ReviewId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
        /// The author already reviewed the course.
        DuplicateReview { course: String, author: String } =>
            "user {author} already reviewed course {course}",
    }
}

/// Storage for reviews. At most one review per author and course.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Store a new review.
    ///
    /// Fails with [`ReviewRepositoryError::DuplicateReview`] when the author
    /// already has a review for the same course.
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Fetch reviews in the order of `ids`, skipping unknown ids.
    async fn find_many(&self, ids: &[ReviewId]) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Delete a review. Returns `false` when it did not exist.
    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewRepositoryError>;
}
