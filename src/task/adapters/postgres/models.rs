//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub id: i64,
    /// Owning user identifier.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub user_id: i64,
    /// Free-text description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Start timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub start_time: DateTime<Utc>,
    /// End timestamp, if ended.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub end_time: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}
