//! Course catalog handlers.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{
    COURSE_NOT_FOUND, CourseDetail, CourseDraft, CourseId, CourseSummary, Error, Prohibition,
};

use super::auth::AuthenticatedUser;
use super::prohibited::refuse;
use super::state::HttpState;
use super::{ApiResult, DataResponse};

/// Malformed ids cannot name a course, so they read as not found.
pub(crate) fn parse_course_id(raw: &str) -> Result<CourseId, Error> {
    CourseId::parse(raw).map_err(|_| Error::not_found(COURSE_NOT_FOUND))
}

/// List every course as `{id, title}`.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Course summaries", body = crate::inbound::http::schemas::CourseListSchema),
        (status = 503, description = "Store unavailable", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DataResponse<CourseSummary>>> {
    let courses = state.courses.list_courses().await?;
    Ok(web::Json(DataResponse::new(courses)))
}

/// Course detail with owner, reviews and overall rating.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course detail", body = crate::inbound::http::schemas::CourseDetailListSchema),
        (status = 404, description = "Course not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security([])
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DataResponse<CourseDetail>>> {
    let id = parse_course_id(&path)?;
    let detail = state.courses.fetch_course(&id).await?;
    Ok(web::Json(DataResponse::single(detail)))
}

/// Create a course owned by the caller.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = crate::inbound::http::schemas::CourseDraftSchema,
    responses(
        (status = 201, description = "Course created", headers(("Location" = String, description = "Always `/courses`"))),
        (status = 401, description = "Not signed in", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 422, description = "Validation failed", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CourseDraft>,
) -> ApiResult<HttpResponse> {
    let course_id = state
        .course_commands
        .create_course(user.id(), payload.into_inner())
        .await?;
    info!(%course_id, "course created over HTTP");
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, "/courses"))
        .finish())
}

/// Replace a course's content. Only the owner may do this.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = crate::inbound::http::schemas::CourseDraftSchema,
    responses(
        (status = 204, description = "Course updated"),
        (status = 401, description = "Not signed in or not the owner", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 404, description = "Course not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 422, description = "Validation failed", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<CourseDraft>,
) -> ApiResult<HttpResponse> {
    let id = parse_course_id(&path)?;
    state
        .course_commands
        .update_course(user.id(), &id, payload.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Always refused; see [`Prohibition::EditCourseCollection`].
#[put("/courses")]
pub async fn edit_courses() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::EditCourseCollection))
}

/// Always refused; see [`Prohibition::DeleteCourseCollection`].
#[delete("/courses")]
pub async fn delete_courses() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::DeleteCourseCollection))
}

/// Always refused; see [`Prohibition::CreateCourseAtId`].
#[post("/courses/{id}")]
pub async fn create_course_at_id() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::CreateCourseAtId))
}

/// Always refused; see [`Prohibition::DeleteCourse`].
#[delete("/courses/{id}")]
pub async fn delete_course() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::DeleteCourse))
}
