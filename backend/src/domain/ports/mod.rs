//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod course_catalog;
mod course_repository;
mod login_service;
mod password_hasher;
mod review_command;
mod review_repository;
mod user_accounts;
mod user_repository;

pub use course_catalog::{CourseCommand, CourseQuery};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(any(test, feature = "test-support"))]
pub use password_hasher::FixturePasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use review_command::ReviewCommand;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
pub use user_accounts::{UserProfileQuery, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
