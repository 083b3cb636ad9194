//! Wire repositories and services into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use backend::inbound::http::state::HttpState;
use backend::outbound::memory::MemoryStore;
use backend::outbound::password_hashing::Argon2PasswordHasher;
use backend::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselReviewRepository, DieselUserRepository,
};

use super::ServerConfig;

/// PostgreSQL-backed state when a pool is configured, in-memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool, hasher, clock),
        None => {
            info!("no database configured; using in-memory store");
            HttpState::from_store(Arc::new(MemoryStore::default()), hasher, clock)
        }
    };
    web::Data::new(state)
}

fn diesel_state(
    pool: &DbPool,
    hasher: Arc<Argon2PasswordHasher>,
    clock: Arc<dyn Clock>,
) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselCourseRepository::new(pool.clone())),
        Arc::new(DieselReviewRepository::new(pool.clone())),
        hasher,
        clock,
    )
}
