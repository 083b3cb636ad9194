//! Review lifecycle service.
//!
//! Creating a review writes the review record and then appends its id to the
//! course. A failed append deletes the new review again so no orphan is
//! left behind. Deleting works in the opposite order: detach, then delete.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::catalog_service::COURSE_NOT_FOUND;
use crate::domain::port_error_mapping::{map_course_error, map_review_error};
use crate::domain::ports::{CourseRepository, ReviewCommand, ReviewRepository};
use crate::domain::{
    Action, Course, CourseId, Error, Review, ReviewDraft, ReviewId, UserId, authorize,
};

/// Message returned when a review id does not resolve.
pub const REVIEW_NOT_FOUND: &str = "Review not found!";

/// Service implementing [`ReviewCommand`].
#[derive(Clone)]
pub struct ReviewService<C, R> {
    courses: Arc<C>,
    reviews: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<C, R> ReviewService<C, R> {
    /// Build the service; `clock` stamps `posted_on`.
    pub fn new(courses: Arc<C>, reviews: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            reviews,
            clock,
        }
    }
}

impl<C, R> ReviewService<C, R>
where
    C: CourseRepository,
    R: ReviewRepository,
{
    async fn require_course(&self, id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))
    }

    /// Undo a review insert after the course append failed.
    async fn compensate(&self, review: &ReviewId) {
        match self.reviews.delete(review).await {
            Ok(_) => warn!(review_id = %review, "review insert rolled back"),
            Err(err) => error!(review_id = %review, error = %err, "review rollback failed"),
        }
    }
}

#[async_trait]
impl<C, R> ReviewCommand for ReviewService<C, R>
where
    C: CourseRepository,
    R: ReviewRepository,
{
    async fn create_review(
        &self,
        author: &UserId,
        course: &CourseId,
        draft: ReviewDraft,
    ) -> Result<ReviewId, Error> {
        let course = self.require_course(course).await?;
        let existing = self
            .reviews
            .find_many(&course.reviews)
            .await
            .map_err(map_review_error)?;
        if let Err(denial) = authorize(
            Some(author),
            Action::CreateReview {
                course: &course,
                existing_reviews: &existing,
            },
        ) {
            warn!(course_id = %course.id, author = %author, reason = denial.message, "review denied");
            return Err(denial.into());
        }
        let content = draft.validate().map_err(Error::validation)?;

        let review = Review {
            id: ReviewId::random(),
            course: course.id,
            author: *author,
            posted_on: self.clock.utc(),
            rating: content.rating,
            review: content.review,
        };
        self.reviews.insert(&review).await.map_err(map_review_error)?;

        let attached = match self.courses.attach_review(&course.id, &review.id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::not_found(COURSE_NOT_FOUND)),
            Err(err) => Err(map_course_error(err)),
        };
        if let Err(err) = attached {
            self.compensate(&review.id).await;
            return Err(err);
        }

        info!(review_id = %review.id, course_id = %course.id, author = %author, "review posted");
        Ok(review.id)
    }

    async fn delete_review(
        &self,
        actor: &UserId,
        course: &CourseId,
        review: &ReviewId,
    ) -> Result<(), Error> {
        let stored = self
            .reviews
            .find_by_id(review)
            .await
            .map_err(map_review_error)?
            .ok_or_else(|| Error::not_found(REVIEW_NOT_FOUND))?;
        let course = self.require_course(course).await?;
        if stored.course != course.id {
            return Err(Error::not_found(REVIEW_NOT_FOUND));
        }
        if let Err(denial) = authorize(
            Some(actor),
            Action::DeleteReview {
                course: &course,
                review: &stored,
            },
        ) {
            warn!(review_id = %review, actor = %actor, "review deletion denied");
            return Err(denial.into());
        }

        self.courses
            .detach_review(&course.id, review)
            .await
            .map_err(map_course_error)?;
        if !self.reviews.delete(review).await.map_err(map_review_error)? {
            return Err(Error::not_found(REVIEW_NOT_FOUND));
        }
        info!(review_id = %review, course_id = %course.id, "review deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
