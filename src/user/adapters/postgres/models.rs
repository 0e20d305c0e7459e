//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub id: i64,
    /// Canonical passport text.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub passport_number: String,
    /// Family name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub surname: String,
    /// Given name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Optional patronymic.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub patronymic: Option<String>,
    /// Postal address.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub address: String,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user records; the identifier is assigned by the
/// database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Canonical passport text.
    pub passport_number: String,
    /// Family name.
    pub surname: String,
    /// Given name.
    pub name: String,
    /// Optional patronymic.
    pub patronymic: Option<String>,
    /// Postal address.
    pub address: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for partial user updates. `None` leaves a column untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    /// New canonical passport text.
    pub passport_number: Option<String>,
    /// New family name.
    pub surname: Option<String>,
    /// New given name.
    pub name: Option<String>,
    /// New patronymic; `Some(None)` writes `NULL`.
    pub patronymic: Option<Option<String>>,
    /// New postal address.
    pub address: Option<String>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}
