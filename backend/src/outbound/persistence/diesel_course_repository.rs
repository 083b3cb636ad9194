//! PostgreSQL-backed `CourseRepository`.
//!
//! Steps are stored as a JSONB array; review references live in
//! `course_reviews` ordered by insertion.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseContent, CourseId, CourseSummary, ReviewId, Step, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CourseContentUpdate, CourseRow, NewCourseReviewRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{course_reviews, courses};

/// Diesel-backed [`CourseRepository`].
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Repository sharing `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    map_basic_pool_error(error, CourseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_basic_diesel_error(
        error,
        |m| CourseRepositoryError::query(m),
        |m| CourseRepositoryError::connection(m),
    )
}

fn steps_to_json(steps: &[Step]) -> Result<serde_json::Value, CourseRepositoryError> {
    serde_json::to_value(steps)
        .map_err(|err| CourseRepositoryError::query(format!("failed to encode steps: {err}")))
}

fn row_to_course(row: CourseRow, reviews: Vec<Uuid>) -> Result<Course, CourseRepositoryError> {
    let steps: Vec<Step> = serde_json::from_value(row.steps).map_err(|err| {
        CourseRepositoryError::query(format!("stored steps for course {} are invalid: {err}", row.id))
    })?;
    Ok(Course {
        id: CourseId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        content: CourseContent {
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            steps,
        },
        reviews: reviews.into_iter().map(ReviewId::from_uuid).collect(),
    })
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list_summaries(&self) -> Result<Vec<CourseSummary>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Uuid, String)> = courses::table
            .order(courses::created_seq.asc())
            .select((courses::id, courses::title))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(id, title)| CourseSummary {
                id: CourseId::from_uuid(id),
                title,
            })
            .collect())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .filter(courses::id.eq(id.as_uuid()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let reviews: Vec<Uuid> = course_reviews::table
            .filter(course_reviews::course_id.eq(id.as_uuid()))
            .order(course_reviews::seq.asc())
            .select(course_reviews::review_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_course(row, reviews).map(Some)
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let content = &course.content;
        let row = NewCourseRow {
            id: *course.id.as_uuid(),
            owner_id: *course.owner.as_uuid(),
            title: &content.title,
            description: &content.description,
            estimated_time: content.estimated_time.as_deref(),
            materials_needed: content.materials_needed.as_deref(),
            steps: steps_to_json(&content.steps)?,
        };
        diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_content(
        &self,
        id: &CourseId,
        content: &CourseContent,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = CourseContentUpdate {
            title: &content.title,
            description: &content.description,
            estimated_time: content.estimated_time.as_deref(),
            materials_needed: content.materials_needed.as_deref(),
            steps: steps_to_json(&content.steps)?,
        };
        let updated = diesel::update(courses::table.filter(courses::id.eq(id.as_uuid())))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn attach_review(
        &self,
        id: &CourseId,
        review: &ReviewId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let exists: bool = diesel::select(diesel::dsl::exists(
            courses::table.filter(courses::id.eq(id.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if !exists {
            return Ok(false);
        }
        diesel::insert_into(course_reviews::table)
            .values(&NewCourseReviewRow {
                course_id: *id.as_uuid(),
                review_id: *review.as_uuid(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(true)
    }

    async fn detach_review(
        &self,
        id: &CourseId,
        review: &ReviewId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            course_reviews::table
                .filter(course_reviews::course_id.eq(id.as_uuid()))
                .filter(course_reviews::review_id.eq(review.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
