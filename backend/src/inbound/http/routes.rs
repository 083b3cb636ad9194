//! Route table for the `/api` scope and the fallback for unmatched paths.
//!
//! ```text
//! GET    /api/courses                          list
//! GET    /api/courses/{id}                     detail
//! POST   /api/courses                          create (auth)
//! PUT    /api/courses/{id}                     update (auth, owner)
//! GET    /api/users                            current user (auth)
//! POST   /api/users                            register
//! POST   /api/login                            session login
//! POST   /api/courses/{courseId}/reviews       create review (auth)
//! DELETE /api/courses/{courseId}/reviews/{id}  delete review (auth)
//! ```

use actix_web::{HttpResponse, web};

use crate::domain::Error;

use super::ApiResult;
use super::{courses, reviews, users};

/// JSON extractor settings: malformed bodies become `400 invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("Invalid request body: {err}")).into()
    })
}

/// Register every API handler. Mount inside `web::scope("/api")`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::routes::api_services;
///
/// let _app = App::new().service(web::scope("/api").configure(api_services));
/// ```
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(users::current_user)
        .service(users::register)
        .service(users::login)
        .service(users::edit_users)
        .service(users::delete_users)
        .service(courses::list_courses)
        .service(courses::create_course)
        .service(courses::edit_courses)
        .service(courses::delete_courses)
        .service(courses::get_course)
        .service(courses::update_course)
        .service(courses::create_course_at_id)
        .service(courses::delete_course)
        .service(reviews::create_review)
        .service(reviews::edit_reviews)
        .service(reviews::delete_reviews)
        .service(reviews::delete_review)
        .service(reviews::get_review)
        .service(reviews::create_review_at_id)
        .service(reviews::edit_review);
}

/// Default service: `404` for anything no route matched.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Not Found"))
}
