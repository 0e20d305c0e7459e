//! `PostgreSQL` repository implementation for task tracking.

use super::{models::TaskRow, schema::tasks};
use crate::store::postgres::PgPool;
use crate::task::{
    domain::{
        DescriptionUniqueness, NewTask, PersistedTaskData, ReportPeriod, Task, TaskDescription,
        TaskId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Bool, Nullable, Text, Timestamptz};
use tracing::debug;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn start(
        &self,
        task: &NewTask,
        uniqueness: DescriptionUniqueness,
    ) -> TaskRepositoryResult<Task> {
        let user_id = task.user_id();
        let description = task.description().as_str().to_owned();
        let start_time = task.start_time();

        self.run_blocking(move |connection| {
            // The NOT EXISTS guard and the insert run as one statement.
            let inserted = diesel::sql_query(concat!(
                "INSERT INTO tasks ",
                "(user_id, description, start_time, end_time, created_at, updated_at) ",
                "SELECT $1, $2, $3, NULL, $3, $3 ",
                "WHERE NOT $4 OR NOT EXISTS (",
                "SELECT 1 FROM tasks ",
                "WHERE user_id = $1 AND description = $2 AND end_time IS NULL) ",
                "RETURNING id, user_id, description, start_time, end_time, created_at, ",
                "updated_at",
            ))
            .bind::<BigInt, _>(user_id.value())
            .bind::<Text, _>(description.as_str())
            .bind::<Timestamptz, _>(start_time)
            .bind::<Bool, _>(uniqueness.is_enforced())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    TaskRepositoryError::UnknownUser(user_id)
                }
                other => TaskRepositoryError::persistence(other),
            })?;

            let row = inserted.ok_or_else(|| TaskRepositoryError::DuplicateOpenTask {
                user_id,
                description: description.clone(),
            })?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            find_row(connection, id)?.map(row_to_task).transpose()
        })
        .await
    }

    async fn close(&self, id: TaskId, end_time: DateTime<Utc>) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let updated = diesel::sql_query(concat!(
                "UPDATE tasks ",
                "SET end_time = GREATEST($2, start_time), updated_at = GREATEST($2, start_time) ",
                "WHERE id = $1 AND end_time IS NULL ",
                "RETURNING id, user_id, description, start_time, end_time, created_at, ",
                "updated_at",
            ))
            .bind::<BigInt, _>(id.value())
            .bind::<Timestamptz, _>(end_time)
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;

            if let Some(row) = updated {
                return row_to_task(row);
            }

            debug!(task_id = %id, "conditional close matched no open task");
            match find_row(connection, id)? {
                Some(_) => Err(TaskRepositoryError::AlreadyEnded(id)),
                None => Err(TaskRepositoryError::NotFound(id)),
            }
        })
        .await
    }

    async fn find_in_period(
        &self,
        user_id: UserId,
        period: &ReportPeriod,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let lower_bound = period.lower_bound();
        let upper_bound = period.end();

        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT id, user_id, description, start_time, end_time, created_at, updated_at ",
                "FROM tasks ",
                "WHERE user_id = $1 ",
                "AND ($2::timestamptz IS NULL OR start_time >= $2) ",
                "AND (end_time IS NULL OR end_time <= $3) ",
                "ORDER BY id",
            ))
            .bind::<BigInt, _>(user_id.value())
            .bind::<Nullable<Timestamptz>, _>(lower_bound)
            .bind::<Timestamptz, _>(upper_bound)
            .load::<TaskRow>(connection)
            .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn find_row(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::id.eq(id.value()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        user_id,
        description,
        start_time,
        end_time,
        created_at,
        updated_at,
    } = row;

    let parsed_description =
        TaskDescription::new(description).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_persisted(id),
        user_id: UserId::from_persisted(user_id),
        description: parsed_description,
        start_time,
        end_time,
        created_at,
        updated_at,
    }))
}
