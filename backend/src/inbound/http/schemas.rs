//! OpenAPI schema definitions for request and response payloads.
//!
//! Domain drafts and details stay free of documentation concerns; these
//! wrappers mirror their JSON shape for utoipa. Only [`crate::domain::Error`]
//! derives `ToSchema` directly because the envelope embeds it verbatim.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa derives"
)]

use utoipa::ToSchema;

use crate::domain::Error;

/// `{ "error": { ... } }` body returned for every failure.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
pub struct ErrorEnvelopeSchema {
    error: Error,
}

/// Account as seen by its owner.
#[derive(ToSchema)]
#[schema(as = UserAccount, rename_all = "camelCase")]
pub struct UserAccountSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Joe Smith")]
    full_name: String,
    #[schema(example = "joe@smith.com")]
    email_address: String,
}

/// `GET /api/users` body.
#[derive(ToSchema)]
#[schema(as = UserList)]
pub struct UserListSchema {
    data: Vec<UserAccountSchema>,
}

/// Registration input. Every field is required.
#[derive(ToSchema)]
#[schema(as = UserDraft, rename_all = "camelCase")]
pub struct UserDraftSchema {
    #[schema(example = "Joe Smith")]
    full_name: String,
    #[schema(example = "joe@smith.com")]
    email_address: String,
    #[schema(example = "password")]
    password: String,
    #[schema(example = "password")]
    confirm_password: String,
}

/// Public view of a user attached to courses and reviews.
#[derive(ToSchema)]
#[schema(as = UserSummary, rename_all = "camelCase")]
pub struct UserSummarySchema {
    id: String,
    #[schema(example = "Joe Smith")]
    full_name: String,
}

#[derive(ToSchema)]
#[schema(as = CourseSummary)]
pub struct CourseSummarySchema {
    id: String,
    #[schema(example = "Build a Basic Bookcase")]
    title: String,
}

/// `GET /api/courses` body.
#[derive(ToSchema)]
#[schema(as = CourseList)]
pub struct CourseListSchema {
    data: Vec<CourseSummarySchema>,
}

#[derive(ToSchema)]
#[schema(as = Step, rename_all = "camelCase")]
pub struct StepSchema {
    #[schema(example = 1)]
    step_number: u32,
    title: String,
    description: String,
}

#[derive(ToSchema)]
#[schema(as = ReviewDetail, rename_all = "camelCase")]
pub struct ReviewDetailSchema {
    id: String,
    user: Option<UserSummarySchema>,
    #[schema(example = "2024-03-01T09:30:00Z")]
    posted_on: String,
    #[schema(minimum = 1, maximum = 5, example = 4)]
    rating: u8,
    review: Option<String>,
}

#[derive(ToSchema)]
#[schema(as = CourseDetail, rename_all = "camelCase")]
pub struct CourseDetailSchema {
    id: String,
    /// Owner; null when the owner record no longer exists.
    user: Option<UserSummarySchema>,
    title: String,
    description: String,
    estimated_time: Option<String>,
    materials_needed: Option<String>,
    steps: Vec<StepSchema>,
    reviews: Vec<ReviewDetailSchema>,
    /// Mean rating rounded half-up; 0 without reviews.
    #[schema(example = 4)]
    overall_rating: u8,
}

/// `GET /api/courses/{id}` body. `data` holds exactly one course.
#[derive(ToSchema)]
#[schema(as = CourseDetailList)]
pub struct CourseDetailListSchema {
    data: Vec<CourseDetailSchema>,
}

#[derive(ToSchema)]
#[schema(as = StepDraft, rename_all = "camelCase")]
pub struct StepDraftSchema {
    /// Defaults to the step's 1-based position. Numeric strings are accepted.
    step_number: Option<u32>,
    title: String,
    description: String,
}

/// Create or replace input for a course.
#[derive(ToSchema)]
#[schema(as = CourseDraft, rename_all = "camelCase")]
pub struct CourseDraftSchema {
    #[schema(example = "Build a Basic Bookcase")]
    title: String,
    description: String,
    #[schema(example = "12 hours")]
    estimated_time: Option<String>,
    materials_needed: Option<String>,
    steps: Vec<StepDraftSchema>,
}

/// Review input. `rating` accepts a number or a numeric string.
#[derive(ToSchema)]
#[schema(as = ReviewDraft)]
pub struct ReviewDraftSchema {
    #[schema(value_type = f64, minimum = 1, maximum = 5, example = 4)]
    rating: serde_json::Value,
    review: Option<String>,
}
