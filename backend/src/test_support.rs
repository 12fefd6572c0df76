//! Shared test doubles for unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use argon2::Params;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::AccountService;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-sec";

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock starting at a fixed instant in 2024.
    pub fn fixed() -> Self {
        match Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single() {
            Some(now) => Self::new(now),
            None => panic!("fixed clock timestamp is ambiguous"),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
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

/// Argon2id with the cheapest parameters the library accepts.
pub fn fast_hasher() -> Argon2PasswordHasher {
    match Params::new(Params::MIN_M_COST, 1, 1, None) {
        Ok(params) => Argon2PasswordHasher::with_params(params),
        Err(error) => panic!("minimum argon2 params rejected: {error}"),
    }
}

pub type TestAccountService =
    AccountService<InMemoryUserRepository, Argon2PasswordHasher, JwtTokenIssuer>;

/// Account service over an empty in-memory store and the given clock.
pub fn account_service(clock: Arc<MutableClock>) -> TestAccountService {
    AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(fast_hasher()),
        Arc::new(JwtTokenIssuer::new(TEST_SECRET, clock)),
    )
}
