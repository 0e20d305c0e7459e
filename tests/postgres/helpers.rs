//! Shared test helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use mockable::Clock;
use std::sync::OnceLock;
use timetrack::{
    store::postgres::{PgPool, apply_schema, build_pool},
    task::adapters::postgres::PostgresTaskRepository,
    user::{
        adapters::postgres::PostgresUserRepository,
        domain::{NewUser, Passport, Profile},
    },
};
use tokio::sync::{Mutex, MutexGuard};

/// Environment variable naming the disposable test database.
pub const DATABASE_URL_VAR: &str = "TIMETRACK_TEST_DATABASE_URL";

static DB_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Repositories over a freshly truncated database.
pub struct Database {
    pub users: PostgresUserRepository,
    pub tasks: PostgresTaskRepository,
    _lock: MutexGuard<'static, ()>,
}

/// Connects, applies the schema and empties both tables.
///
/// Returns `None` when no test database is configured.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the reset fails.
pub async fn database() -> Result<Option<Database>, eyre::Report> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        return Ok(None);
    };
    let lock = DB_LOCK.get_or_init(|| Mutex::new(())).lock().await;
    let pool = build_pool(&url, 2)?;
    apply_schema(&pool).await?;
    reset(&pool).await?;
    Ok(Some(Database {
        users: PostgresUserRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool),
        _lock: lock,
    }))
}

async fn reset(pool: &PgPool) -> Result<(), eyre::Report> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), eyre::Report> {
        let mut connection = shared.get()?;
        connection.batch_execute("TRUNCATE tasks, users RESTART IDENTITY CASCADE")?;
        Ok(())
    })
    .await??;
    Ok(())
}

/// Fixed clock for deterministic timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.0.with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Monday 2026-01-05 09:00 UTC.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds an insertable user.
pub fn new_user(passport: &str, surname: &str, patronymic: Option<&str>) -> NewUser {
    let profile = Profile::new(surname, "Ivan", patronymic.map(str::to_owned), "Moscow")
        .expect("valid profile fixture");
    NewUser::new(
        Passport::parse(passport).expect("valid passport fixture"),
        profile,
        &FixedClock(base_time()),
    )
}
