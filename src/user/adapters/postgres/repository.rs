//! `PostgreSQL` repository implementation for users.

use super::{
    models::{NewUserRow, UserChangeset, UserRow},
    schema::users,
};
use crate::store::postgres::PgPool;
use crate::user::{
    domain::{
        NewUser, Page, Passport, PersistedUserData, Profile, User, UserFilter, UserId, UserPatch,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let passport = user.passport().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(|err| map_write_error(err, Some(&passport)))?;
            row_to_user(row)
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list(&self, filter: &UserFilter, page: Page) -> UserRepositoryResult<Vec<User>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = users::table.select(UserRow::as_select()).into_boxed();
            if let Some(id) = criteria.id {
                query = query.filter(users::id.eq(id.value()));
            }
            if let Some(passport) = criteria.passport.as_deref() {
                query = query.filter(users::passport_number.like(contains_pattern(passport)));
            }
            if let Some(surname) = criteria.surname.as_deref() {
                query = query.filter(users::surname.like(contains_pattern(surname)));
            }
            if let Some(name) = criteria.name.as_deref() {
                query = query.filter(users::name.like(contains_pattern(name)));
            }
            if let Some(patronymic) = criteria.patronymic.as_deref() {
                query = query.filter(users::patronymic.like(contains_pattern(patronymic)));
            }
            if let Some(address) = criteria.address.as_deref() {
                query = query.filter(users::address.like(contains_pattern(address)));
            }

            let rows = query
                .order(users::id.asc())
                .limit(page.limit())
                .offset(page.offset())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<User> {
        let changeset = to_changeset(patch, updated_at);
        let new_passport = patch.passport().cloned();

        self.run_blocking(move |connection| {
            let row = diesel::update(users::table.filter(users::id.eq(id.value())))
                .set(&changeset)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .optional()
                .map_err(|err| map_write_error(err, new_passport.as_ref()))?;
            let found = row.ok_or(UserRepositoryError::NotFound(id))?;
            row_to_user(found)
        })
        .await
    }

    async fn remove(&self, id: UserId) -> UserRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(users::table.filter(users::id.eq(id.value())))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Builds a `LIKE` pattern matching values that contain `needle` verbatim.
///
/// `%`, `_` and the backslash escape character are escaped so that caller
/// input is never interpreted as a wildcard.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Maps a unique violation on a written passport to `DuplicatePassport`.
fn map_write_error(err: DieselError, passport: Option<&Passport>) -> UserRepositoryError {
    match (err, passport) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(written)) => {
            UserRepositoryError::DuplicatePassport(written.clone())
        }
        (other, _) => UserRepositoryError::persistence(other),
    }
}

fn to_new_row(user: &NewUser) -> NewUserRow {
    let profile = user.profile();
    NewUserRow {
        passport_number: user.passport().to_string(),
        surname: profile.surname().to_owned(),
        name: profile.name().to_owned(),
        patronymic: profile.patronymic().map(str::to_owned),
        address: profile.address().to_owned(),
        created_at: user.created_at(),
        updated_at: user.created_at(),
    }
}

fn to_changeset(patch: &UserPatch, updated_at: DateTime<Utc>) -> UserChangeset {
    UserChangeset {
        passport_number: patch.passport().map(ToString::to_string),
        surname: patch.surname().map(str::to_owned),
        name: patch.name().map(str::to_owned),
        patronymic: patch.patronymic().map(|value| value.map(str::to_owned)),
        address: patch.address().map(str::to_owned),
        updated_at,
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        passport_number,
        surname,
        name,
        patronymic,
        address,
        created_at,
        updated_at,
    } = row;

    let passport = Passport::parse(&passport_number).map_err(UserRepositoryError::persistence)?;
    let profile = Profile::new(surname, name, patronymic, address)
        .map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_persisted(id),
        passport,
        profile,
        created_at,
        updated_at,
    }))
}
