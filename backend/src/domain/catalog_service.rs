//! Course catalog service.
//!
//! Resolves owners and reviews for course detail views and applies the
//! ownership policy to course edits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::port_error_mapping::{map_course_error, map_review_error, map_user_error};
use crate::domain::ports::{
    CourseCommand, CourseQuery, CourseRepository, ReviewRepository, UserRepository,
};
use crate::domain::{
    Action, Course, CourseDetail, CourseDraft, CourseId, CourseSummary, Error, ReviewDetail,
    UserId, UserSummary, authorize, overall_rating,
};

/// Message returned when a course id does not resolve.
pub const COURSE_NOT_FOUND: &str = "Course not found!";

/// Service implementing the catalog driving ports.
#[derive(Clone)]
pub struct CatalogService<C, R, U> {
    courses: Arc<C>,
    reviews: Arc<R>,
    users: Arc<U>,
}

impl<C, R, U> CatalogService<C, R, U> {
    /// Build the service over the course, review and user repositories.
    pub fn new(courses: Arc<C>, reviews: Arc<R>, users: Arc<U>) -> Self {
        Self {
            courses,
            reviews,
            users,
        }
    }
}

impl<C, R, U> CatalogService<C, R, U>
where
    C: CourseRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    async fn require_course(&self, id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))
    }

    async fn user_summaries(
        &self,
        ids: Vec<UserId>,
    ) -> Result<HashMap<UserId, UserSummary>, Error> {
        let mut ids = ids;
        ids.sort_unstable();
        ids.dedup();
        let users = self.users.find_many(&ids).await.map_err(map_user_error)?;
        Ok(users.iter().map(|u| (u.id, u.summary())).collect())
    }
}

#[async_trait]
impl<C, R, U> CourseQuery for CatalogService<C, R, U>
where
    C: CourseRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    async fn list_courses(&self) -> Result<Vec<CourseSummary>, Error> {
        self.courses.list_summaries().await.map_err(map_course_error)
    }

    async fn fetch_course(&self, id: &CourseId) -> Result<CourseDetail, Error> {
        let course = self.require_course(id).await?;
        let reviews = self
            .reviews
            .find_many(&course.reviews)
            .await
            .map_err(map_review_error)?;

        let people = std::iter::once(course.owner)
            .chain(reviews.iter().map(|r| r.author))
            .collect();
        let summaries = self.user_summaries(people).await?;

        let rating = overall_rating(reviews.iter().map(|r| r.rating));
        let reviews = reviews
            .into_iter()
            .map(|review| {
                let author = summaries.get(&review.author).cloned();
                ReviewDetail::new(review, author)
            })
            .collect();
        let Course {
            id,
            owner,
            content,
            reviews: _,
        } = course;

        Ok(CourseDetail {
            id,
            user: summaries.get(&owner).cloned(),
            title: content.title,
            description: content.description,
            estimated_time: content.estimated_time,
            materials_needed: content.materials_needed,
            steps: content.steps,
            reviews,
            overall_rating: rating,
        })
    }
}

#[async_trait]
impl<C, R, U> CourseCommand for CatalogService<C, R, U>
where
    C: CourseRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    async fn create_course(&self, owner: &UserId, draft: CourseDraft) -> Result<CourseId, Error> {
        authorize(Some(owner), Action::CreateCourse)?;
        let content = draft.validate().map_err(Error::validation)?;
        let course = Course {
            id: CourseId::random(),
            owner: *owner,
            content,
            reviews: Vec::new(),
        };
        self.courses.insert(&course).await.map_err(map_course_error)?;
        info!(course_id = %course.id, owner = %owner, "course created");
        Ok(course.id)
    }

    async fn update_course(
        &self,
        actor: &UserId,
        id: &CourseId,
        draft: CourseDraft,
    ) -> Result<(), Error> {
        let course = self.require_course(id).await?;
        if let Err(denial) = authorize(Some(actor), Action::UpdateCourse { course: &course }) {
            warn!(course_id = %id, actor = %actor, "course update denied");
            return Err(denial.into());
        }
        let content = draft.validate().map_err(Error::validation)?;
        let updated = self
            .courses
            .update_content(id, &content)
            .await
            .map_err(map_course_error)?;
        if !updated {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        info!(course_id = %id, "course updated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
