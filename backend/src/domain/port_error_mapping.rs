//! Mapping from port errors to domain errors.
//!
//! Connection failures surface as 503, query failures as 500. Constraint
//! violations that a client can cause map to the same error the equivalent
//! up-front check would have produced.

use tracing::debug;

use super::ports::{
    CourseRepositoryError, PasswordHashError, ReviewRepositoryError, UserPersistenceError,
};
use super::policy::ONE_REVIEW_PER_COURSE;
use super::user::EMAIL_IN_USE;
use super::{Error, FieldError};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    debug!(%error, "user repository failure");
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::validation(vec![FieldError::new("emailAddress", EMAIL_IN_USE)])
        }
    }
}

pub(crate) fn map_course_error(error: CourseRepositoryError) -> Error {
    debug!(%error, "course repository failure");
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

pub(crate) fn map_review_error(error: ReviewRepositoryError) -> Error {
    debug!(%error, "review repository failure");
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
        ReviewRepositoryError::DuplicateReview { .. } => Error::unauthorized(ONE_REVIEW_PER_COURSE),
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    debug!(%error, "password hasher failure");
    Error::internal(format!("password hashing failed: {error}"))
}
