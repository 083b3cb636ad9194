//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! can be exercised over the in-memory store or with hand-written fakes.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CourseCommand, CourseQuery, CourseRepository, LoginService, PasswordHasher, ReviewCommand,
    ReviewRepository, UserProfileQuery, UserRegistration, UserRepository,
};
use crate::domain::{CatalogService, ReviewService, UserAccountService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub courses: Arc<dyn CourseQuery>,
    pub course_commands: Arc<dyn CourseCommand>,
    pub reviews: Arc<dyn ReviewCommand>,
}

impl HttpState {
    /// Wire the domain services over separate repository adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::MemoryStore;
    /// use backend::outbound::password_hashing::Argon2PasswordHasher;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::default());
    /// let state = HttpState::from_repositories(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(Argon2PasswordHasher::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _courses = state.courses.clone();
    /// ```
    pub fn from_repositories<U, C, R, H>(
        users: Arc<U>,
        courses: Arc<C>,
        reviews: Arc<R>,
        hasher: Arc<H>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        C: CourseRepository + 'static,
        R: ReviewRepository + 'static,
        H: PasswordHasher + 'static,
    {
        let accounts = Arc::new(UserAccountService::new(users.clone(), hasher));
        let catalog = Arc::new(CatalogService::new(
            courses.clone(),
            reviews.clone(),
            users,
        ));
        let review_service = Arc::new(ReviewService::new(courses, reviews, clock));
        Self {
            login: accounts.clone(),
            registration: accounts.clone(),
            profile: accounts,
            courses: catalog.clone(),
            course_commands: catalog,
            reviews: review_service,
        }
    }

    /// Wire the domain services over one adapter implementing every
    /// repository port.
    pub fn from_store<S, H>(store: Arc<S>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self
    where
        S: UserRepository + CourseRepository + ReviewRepository + 'static,
        H: PasswordHasher + 'static,
    {
        Self::from_repositories(store.clone(), store.clone(), store, hasher, clock)
    }
}
