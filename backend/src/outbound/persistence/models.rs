//! Internal Diesel row structs. Never exposed outside the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{course_reviews, courses, reviews, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub full_name: String,
    pub email_address: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email_address: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub steps: serde_json::Value,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub estimated_time: Option<&'a str>,
    pub materials_needed: Option<&'a str>,
    pub steps: serde_json::Value,
}

/// Full replacement of a course's editable columns; `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseContentUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub estimated_time: Option<&'a str>,
    pub materials_needed: Option<&'a str>,
    pub steps: serde_json::Value,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub author_id: Uuid,
    pub posted_on: DateTime<Utc>,
    pub rating: i16,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = course_reviews)]
pub(crate) struct NewCourseReviewRow {
    pub course_id: Uuid,
    pub review_id: Uuid,
}
