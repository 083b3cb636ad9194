//! Authorization decisions for course and review actions.
//!
//! The policy is pure: callers resolve the resources first (producing 404s
//! for unknown ids) and then ask whether the actor may proceed.

use super::Error;
use super::course::Course;
use super::ids::UserId;
use super::review::Review;

/// Sent when a protected route is called anonymously.
pub const SIGN_IN_REQUIRED: &str = "Please sign in to continue.";
pub const EDIT_OWN_COURSE_ONLY: &str = "You can only edit a course for yourself.";
pub const ONE_REVIEW_PER_COURSE: &str = "Sorry, you can only add one review per course.";
/// Sent when an owner reviews their own course.
pub const NO_SELF_REVIEW: &str = "Sorry, you can't review your own courses.";
pub const DELETE_REVIEW_DENIED: &str =
    "Sorry, only the review owner or course owner can delete a review.";

/// Requests rejected for every caller, authenticated or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prohibition {
    /// `PUT /api/users`
    EditUserCollection,
    /// `DELETE /api/users`
    DeleteUserCollection,
    /// `PUT /api/courses`
    EditCourseCollection,
    /// `DELETE /api/courses`
    DeleteCourseCollection,
    /// `POST /api/courses/{id}`; answered with 405.
    CreateCourseAtId,
    /// `DELETE /api/courses/{id}`
    DeleteCourse,
    /// `PUT /api/courses/{courseId}/reviews`
    EditReviewCollection,
    /// `DELETE /api/courses/{courseId}/reviews`
    DeleteReviewCollection,
    /// `GET /api/courses/{courseId}/reviews/{id}`
    GetSingleReview,
    /// `POST /api/courses/{courseId}/reviews/{id}`; answered with 405.
    CreateReviewAtId,
    /// `PUT /api/courses/{courseId}/reviews/{id}`
    EditReview,
}

impl Prohibition {
    /// Client-facing explanation.
    pub fn message(self) -> &'static str {
        match self {
            Self::EditUserCollection => "Cannot edit a collection of users.",
            Self::DeleteUserCollection => "Cannot delete a collection of users.",
            Self::EditCourseCollection => "Cannot edit a collection of courses.",
            Self::DeleteCourseCollection => "Cannot delete a collection of courses.",
            Self::CreateCourseAtId => "Use the '/api/courses' route to create a course.",
            Self::DeleteCourse => "Cannot delete a course.",
            Self::EditReviewCollection => "Cannot edit a collection of reviews.",
            Self::DeleteReviewCollection => "Cannot delete a collection of reviews.",
            Self::GetSingleReview => {
                "Cannot get a single review. Use the '/api/courses/:id' route instead to get the reviews for a specific course."
            }
            Self::CreateReviewAtId => {
                "Use the '/api/courses/:courseId/reviews' route to create a review."
            }
            Self::EditReview => "Cannot edit a review.",
        }
    }

    /// Methods a 405 response advertises, or `None` for a 403.
    pub fn allow(self) -> Option<&'static [&'static str]> {
        match self {
            Self::CreateCourseAtId => Some(&["GET", "PUT"]),
            Self::CreateReviewAtId => Some(&["DELETE"]),
            _ => None,
        }
    }
}

/// Action an actor wants to take, with the resources it touches.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateCourse,
    UpdateCourse {
        course: &'a Course,
    },
    CreateReview {
        course: &'a Course,
        existing_reviews: &'a [Review],
    },
    DeleteReview {
        course: &'a Course,
        review: &'a Review,
    },
    Prohibited(Prohibition),
}

/// Category of a refused action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    Unauthorized,
    Forbidden,
    MethodNotAllowed { allow: &'static [&'static str] },
}

/// Refusal with the message shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Denial {
    pub kind: DenialKind,
    pub message: &'static str,
}

impl Denial {
    const fn unauthorized(message: &'static str) -> Self {
        Self {
            kind: DenialKind::Unauthorized,
            message,
        }
    }
}

impl From<Denial> for Error {
    fn from(denial: Denial) -> Self {
        match denial.kind {
            DenialKind::Unauthorized => Self::unauthorized(denial.message),
            DenialKind::Forbidden => Self::forbidden(denial.message),
            DenialKind::MethodNotAllowed { allow } => {
                Self::method_not_allowed(denial.message, allow)
            }
        }
    }
}

/// Decide whether `actor` may perform `action`.
///
/// Prohibitions apply regardless of the actor. Every other action requires
/// an actor.
///
/// # Examples
/// ```
/// use backend::domain::{Action, DenialKind, Prohibition, UserId, authorize};
///
/// let denial = authorize(None, Action::Prohibited(Prohibition::CreateCourseAtId))
///     .unwrap_err();
/// assert_eq!(denial.kind, DenialKind::MethodNotAllowed { allow: &["GET", "PUT"] });
///
/// let actor = UserId::random();
/// assert!(authorize(Some(&actor), Action::CreateCourse).is_ok());
/// assert!(authorize(None, Action::CreateCourse).is_err());
/// ```
pub fn authorize(actor: Option<&UserId>, action: Action<'_>) -> Result<(), Denial> {
    if let Action::Prohibited(prohibition) = action {
        let kind = match prohibition.allow() {
            Some(allow) => DenialKind::MethodNotAllowed { allow },
            None => DenialKind::Forbidden,
        };
        return Err(Denial {
            kind,
            message: prohibition.message(),
        });
    }

    let Some(actor) = actor else {
        return Err(Denial::unauthorized(SIGN_IN_REQUIRED));
    };

    match action {
        Action::CreateCourse | Action::Prohibited(_) => Ok(()),
        Action::UpdateCourse { course } => {
            if course.owner == *actor {
                Ok(())
            } else {
                Err(Denial::unauthorized(EDIT_OWN_COURSE_ONLY))
            }
        }
        Action::CreateReview {
            course,
            existing_reviews,
        } => {
            if existing_reviews.iter().any(|r| r.author == *actor) {
                Err(Denial::unauthorized(ONE_REVIEW_PER_COURSE))
            } else if course.owner == *actor {
                Err(Denial::unauthorized(NO_SELF_REVIEW))
            } else {
                Ok(())
            }
        }
        Action::DeleteReview { course, review } => {
            if review.author == *actor || course.owner == *actor {
                Ok(())
            } else {
                Err(Denial::unauthorized(DELETE_REVIEW_DENIED))
            }
        }
    }
}
