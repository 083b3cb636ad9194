//! Domain primitives, policies and services.
//!
//! Purpose: define strongly typed entities for users, courses and reviews,
//! the validation and authorization rules that govern them, and the services
//! that implement the driving ports on top of the driven ports.
//!
//! Public surface:
//! - Identifiers: `UserId`, `CourseId`, `ReviewId`.
//! - Entities and drafts: `User`, `Course`, `Review` and their `*Draft`
//!   inputs, each with a `validate` method.
//! - `authorize` and its `Action`/`Denial` types.
//! - `Error`/`ErrorCode`, the transport-agnostic failure type.
//! - Services: `UserAccountService`, `CatalogService`, `ReviewService`.

pub mod auth;
pub mod catalog_service;
pub mod course;
pub mod error;
pub mod ids;
pub mod policy;
pub(crate) mod port_error_mapping;
pub mod ports;
pub mod review;
pub mod review_service;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::catalog_service::{COURSE_NOT_FOUND, CatalogService};
pub use self::course::{
    Course, CourseContent, CourseDetail, CourseDraft, CourseSummary, Step, StepDraft,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CourseId, IdParseError, ReviewId, UserId};
pub use self::policy::{Action, Denial, DenialKind, Prohibition, authorize};
pub use self::review::{
    Rating, RatingError, Review, ReviewContent, ReviewDetail, ReviewDraft, overall_rating,
};
pub use self::review_service::{REVIEW_NOT_FOUND, ReviewService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, EmailValidationError, NewUser, User, UserDraft, UserSummary,
};
pub use self::user_service::UserAccountService;
pub use self::validation::{FieldError, ValidationErrors};

