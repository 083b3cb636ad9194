//! PostgreSQL-backed `ReviewRepository`.
//!
//! The `(course_id, author_id)` unique constraint enforces one review per
//! author and course even under concurrent inserts.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{CourseId, Rating, Review, ReviewId, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::ReviewRow;
use super::pool::{DbPool, PoolError};
use super::schema::reviews;

/// Diesel-backed [`ReviewRepository`].
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Repository sharing `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    map_basic_pool_error(error, ReviewRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewRepositoryError {
    map_basic_diesel_error(
        error,
        |m| ReviewRepositoryError::query(m),
        |m| ReviewRepositoryError::connection(m),
    )
}

fn row_to_review(row: ReviewRow) -> Result<Review, ReviewRepositoryError> {
    let rating = Rating::try_from_stored(row.rating).map_err(|err| {
        ReviewRepositoryError::query(format!("stored rating for review {} is invalid: {err}", row.id))
    })?;
    Ok(Review {
        id: ReviewId::from_uuid(row.id),
        course: CourseId::from_uuid(row.course_id),
        author: UserId::from_uuid(row.author_id),
        posted_on: row.posted_on,
        rating,
        review: row.review,
    })
}

fn review_to_row(review: &Review) -> ReviewRow {
    ReviewRow {
        id: *review.id.as_uuid(),
        course_id: *review.course.as_uuid(),
        author_id: *review.author.as_uuid(),
        posted_on: review.posted_on,
        rating: i16::from(review.rating.get()),
        review: review.review.clone(),
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reviews::table)
            .values(&review_to_row(review))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ReviewRepositoryError::duplicate_review(
                        review.course.to_string(),
                        review.author.to_string(),
                    )
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ReviewRow> = reviews::table
            .filter(reviews::id.eq(id.as_uuid()))
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_review).transpose()
    }

    async fn find_many(&self, ids: &[ReviewId]) -> Result<Vec<Review>, ReviewRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let keys: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::id.eq_any(&keys))
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let mut by_id: HashMap<Uuid, ReviewRow> =
            rows.into_iter().map(|row| (row.id, row)).collect();
        keys.iter()
            .filter_map(|key| by_id.remove(key))
            .map(row_to_review)
            .collect()
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(reviews::table.filter(reviews::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
