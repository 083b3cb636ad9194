//! OpenAPI documentation for the REST API.
//!
//! Served by Swagger UI at `/docs` in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{
    CourseDetailListSchema, CourseDraftSchema, CourseListSchema, ErrorEnvelopeSchema,
    ReviewDraftSchema, UserDraftSchema, UserListSchema,
};
use crate::inbound::http::users::LoginRequest;

/// Registers the two ways a caller can authenticate.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Basic)
                    .description(Some("Email address and password."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Courses API",
        description = "Courses with ordered steps, user accounts and one review per user per course."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = []), ("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelopeSchema,
        UserListSchema,
        UserDraftSchema,
        LoginRequest,
        CourseListSchema,
        CourseDetailListSchema,
        CourseDraftSchema,
        ReviewDraftSchema
    )),
    tags(
        (name = "users", description = "Registration, sign-in and the current account"),
        (name = "courses", description = "Course catalog"),
        (name = "reviews", description = "Course reviews"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document for the courses API.
pub struct ApiDoc;
