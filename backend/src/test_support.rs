//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::FixturePasswordHasher;
use crate::domain::{CourseDraft, StepDraft, UserDraft, UserId};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;

/// Password given to every user created by [`register_user`].
pub const FIXTURE_PASSWORD: &str = "password";

/// Timestamp used by fixtures that need a stable "now".
///
/// # Panics
/// Never in practice; the date literal is valid.
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single() {
        Some(ts) => ts,
        None => panic!("fixture timestamp must be valid"),
    }
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// HTTP state over a fresh in-memory store, a fast password hasher and a
/// clock pinned to [`fixture_timestamp`].
pub fn memory_http_state() -> (HttpState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let clock: Arc<dyn Clock> = Arc::new(MutableClock::new(fixture_timestamp()));
    let state = HttpState::from_store(store.clone(), Arc::new(FixturePasswordHasher), clock);
    (state, store)
}

/// Register a user through the registration port.
///
/// # Panics
/// When registration fails; callers pass valid, unused addresses.
pub async fn register_user(state: &HttpState, full_name: &str, email: &str) -> UserId {
    match state
        .registration
        .register(UserDraft {
            full_name: Some(full_name.to_owned()),
            email_address: Some(email.to_owned()),
            password: Some(FIXTURE_PASSWORD.to_owned()),
            confirm_password: Some(FIXTURE_PASSWORD.to_owned()),
        })
        .await
    {
        Ok(id) => id,
        Err(err) => panic!("fixture registration failed: {err}"),
    }
}

/// A valid two-step course draft.
pub fn course_draft(title: &str) -> CourseDraft {
    CourseDraft {
        title: Some(title.to_owned()),
        description: Some("High-end furniture projects are great to dream about.".to_owned()),
        estimated_time: Some("12 hours".to_owned()),
        materials_needed: Some("1 x 4 pine boards".to_owned()),
        steps: Some(vec![
            StepDraft {
                step_number: Some(1.into()),
                title: Some("Gather materials".to_owned()),
                description: Some("Buy the boards and screws.".to_owned()),
            },
            StepDraft {
                step_number: Some(2.into()),
                title: Some("Assemble".to_owned()),
                description: Some("Screw the shelves to the sides.".to_owned()),
            },
        ]),
    }
}
