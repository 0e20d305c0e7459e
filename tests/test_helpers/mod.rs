//! Shared fixtures for integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use timetrack::user::{
    adapters::memory::StaticProfileDirectory,
    domain::{Passport, Profile},
};

/// Clock that only moves when a test advances it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Monday 2026-01-05 09:00 UTC.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Parses a passport fixture.
pub fn passport(raw: &str) -> Passport {
    Passport::parse(raw).expect("valid passport fixture")
}

/// Profile directory knowing three people.
pub fn directory() -> StaticProfileDirectory {
    let people = [
        ("1234 567890", "Ivanov", "Ivan", Some("Ivanovich"), "Moscow, Lenina 1"),
        ("4321 098765", "Petrova", "Anna", None, "Kazan, Baumana 7"),
        ("5555 111111", "Sidorov", "Oleg", Some("Petrovich"), "Tver, Sovetskaya 3"),
    ];
    people
        .into_iter()
        .fold(StaticProfileDirectory::new(), |dir, (raw, surname, name, patronymic, address)| {
            let profile = Profile::new(surname, name, patronymic.map(str::to_owned), address)
                .expect("valid profile fixture");
            dir.with_profile(passport(raw), profile)
        })
}
