//! Review handlers nested under a course.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{Error, Prohibition, REVIEW_NOT_FOUND, ReviewDraft, ReviewId};

use super::ApiResult;
use super::auth::AuthenticatedUser;
use super::courses::parse_course_id;
use super::prohibited::refuse;
use super::state::HttpState;

fn parse_review_id(raw: &str) -> Result<ReviewId, Error> {
    ReviewId::parse(raw).map_err(|_| Error::not_found(REVIEW_NOT_FOUND))
}

/// Post a review on someone else's course.
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/reviews",
    params(("course_id" = String, Path, description = "Course identifier")),
    request_body = crate::inbound::http::schemas::ReviewDraftSchema,
    responses(
        (status = 201, description = "Review created", headers(("Location" = String, description = "The reviewed course"))),
        (status = 401, description = "Not signed in, own course, or already reviewed", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 404, description = "Course not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 422, description = "Validation failed", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/courses/{course_id}/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ReviewDraft>,
) -> ApiResult<HttpResponse> {
    let course_id = parse_course_id(&path)?;
    let review_id = state
        .reviews
        .create_review(user.id(), &course_id, payload.into_inner())
        .await?;
    info!(%review_id, %course_id, "review created over HTTP");
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/courses/{course_id}")))
        .finish())
}

/// Delete a review. Allowed for its author and the course owner.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/reviews/{id}",
    params(
        ("course_id" = String, Path, description = "Course identifier"),
        ("id" = String, Path, description = "Review identifier")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Not signed in or not permitted", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 404, description = "Course or review not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/courses/{course_id}/reviews/{id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_course, raw_review) = path.into_inner();
    let review_id = parse_review_id(&raw_review)?;
    let course_id = parse_course_id(&raw_course)?;
    state
        .reviews
        .delete_review(user.id(), &course_id, &review_id)
        .await?;
    info!(%review_id, %course_id, "review deleted over HTTP");
    Ok(HttpResponse::NoContent().finish())
}

/// Always refused; see [`Prohibition::EditReviewCollection`].
#[put("/courses/{course_id}/reviews")]
pub async fn edit_reviews() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::EditReviewCollection))
}

/// Always refused; see [`Prohibition::DeleteReviewCollection`].
#[delete("/courses/{course_id}/reviews")]
pub async fn delete_reviews() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::DeleteReviewCollection))
}

/// Always refused; see [`Prohibition::GetSingleReview`].
#[get("/courses/{course_id}/reviews/{id}")]
pub async fn get_review() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::GetSingleReview))
}

/// Always refused; see [`Prohibition::CreateReviewAtId`].
#[post("/courses/{course_id}/reviews/{id}")]
pub async fn create_review_at_id() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::CreateReviewAtId))
}

/// Always refused; see [`Prohibition::EditReview`].
#[put("/courses/{course_id}/reviews/{id}")]
pub async fn edit_review() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::EditReview))
}
