//! Request and response bodies for the HTTP boundary.
//!
//! Query parameters arrive as optional strings and are parsed here so that
//! each malformed value produces a specific `400` message.

use super::error::ApiError;
use crate::task::{domain::TaskSummary, services::PeriodQuery};
use crate::user::{
    domain::{Page, User, UserFilter, UserId},
    services::UpdateUserRequest,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Success envelope carrying a short message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageBody {
    /// Creates a message envelope.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query parameters of `GET /users`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    /// One-based page number.
    pub page: Option<String>,
    /// Rows per page.
    pub page_size: Option<String>,
    /// Exact user identifier.
    pub id: Option<String>,
    /// Passport substring.
    pub passport_number: Option<String>,
    /// Surname substring.
    pub surname: Option<String>,
    /// Given-name substring.
    pub name: Option<String>,
    /// Patronymic substring.
    pub patronymic: Option<String>,
    /// Address substring.
    pub address: Option<String>,
}

impl ListUsersParams {
    /// Parses the parameters into a filter and a page.
    ///
    /// # Errors
    ///
    /// Returns a `400` [`ApiError`] when the page, page size or identifier
    /// is not a positive integer.
    pub fn into_query(self) -> Result<(UserFilter, Page), ApiError> {
        let page_number = parse_positive(self.page.as_deref(), "page")?.unwrap_or(DEFAULT_PAGE);
        let page_size =
            parse_positive(self.page_size.as_deref(), "pageSize")?.unwrap_or(DEFAULT_PAGE_SIZE);
        let page = Page::new(page_number, page_size)
            .map_err(|err| ApiError::bad_request(err.to_string()))?;

        let id = parse_id(self.id.as_deref(), "id")?
            .map(UserId::new)
            .transpose()
            .map_err(|err| ApiError::bad_request(err.to_string()))?;

        let filter = UserFilter {
            id,
            passport: non_blank(self.passport_number),
            surname: non_blank(self.surname),
            name: non_blank(self.name),
            patronymic: non_blank(self.patronymic),
            address: non_blank(self.address),
        };
        Ok((filter, page))
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserBody {
    /// Passport as `"SSSS NNNNNN"`.
    #[serde(alias = "passportNumber")]
    pub passport: String,
}

/// Query parameters of `PUT /users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserIdParams {
    /// Target user identifier.
    pub id: Option<String>,
}

impl UserIdParams {
    /// Returns the parsed identifier.
    ///
    /// # Errors
    ///
    /// Returns a `400` [`ApiError`] when the identifier is missing or not an
    /// integer.
    pub fn require_id(&self) -> Result<i64, ApiError> {
        parse_id(self.id.as_deref(), "id")?.ok_or_else(|| ApiError::bad_request("id is required"))
    }
}

/// Body of `PUT /users`; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserBody {
    /// Replacement passport.
    #[serde(default, alias = "passportNumber")]
    pub passport: Option<String>,
    /// Replacement surname.
    #[serde(default)]
    pub surname: Option<String>,
    /// Replacement given name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement patronymic; an empty string clears it.
    #[serde(default)]
    pub patronymic: Option<String>,
    /// Replacement address.
    #[serde(default)]
    pub address: Option<String>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        let UpdateUserBody {
            passport,
            surname,
            name,
            patronymic,
            address,
        } = body;
        let mut request = Self::new();
        if let Some(value) = passport {
            request = request.with_passport(value);
        }
        if let Some(value) = surname {
            request = request.with_surname(value);
        }
        if let Some(value) = name {
            request = request.with_name(value);
        }
        if let Some(value) = patronymic {
            request = request.with_patronymic(value);
        }
        if let Some(value) = address {
            request = request.with_address(value);
        }
        request
    }
}

/// Body of `DELETE /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserBody {
    /// Target user identifier.
    pub id: i64,
}

/// User representation returned by `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    pub id: i64,
    /// Canonical passport text.
    pub passport_number: String,
    /// Family name.
    pub surname: String,
    /// Given name.
    pub name: String,
    /// Patronymic, if any.
    pub patronymic: Option<String>,
    /// Postal address.
    pub address: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().value(),
            passport_number: user.passport().to_string(),
            surname: profile.surname().to_owned(),
            name: profile.name().to_owned(),
            patronymic: profile.patronymic().map(str::to_owned),
            address: profile.address().to_owned(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Query parameters of `GET /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPeriodParams {
    /// Owning user identifier.
    pub user_id: Option<String>,
    /// RFC 3339 lower bound on task start.
    pub start_time: Option<String>,
    /// RFC 3339 upper bound on task end.
    pub end_time: Option<String>,
}

impl TaskPeriodParams {
    /// Parses the parameters into a period query.
    ///
    /// # Errors
    ///
    /// Returns a `400` [`ApiError`] when the user identifier is missing or
    /// malformed, or a bound is not RFC 3339.
    pub fn into_query(self) -> Result<PeriodQuery, ApiError> {
        let user_id = parse_id(self.user_id.as_deref(), "userId")?
            .ok_or_else(|| ApiError::bad_request("userId is required"))?;
        let mut query = PeriodQuery::new(user_id);
        if let Some(start) = parse_timestamp(self.start_time.as_deref(), "startTime")? {
            query = query.with_start(start);
        }
        if let Some(end) = parse_timestamp(self.end_time.as_deref(), "endTime")? {
            query = query.with_end(end);
        }
        Ok(query)
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTaskBody {
    /// Owning user identifier.
    pub user_id: i64,
    /// Task description.
    pub task_name: String,
}

/// Query parameters of `POST /tasks/end`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTaskParams {
    /// Target task identifier.
    pub task_id: Option<String>,
}

impl EndTaskParams {
    /// Returns the parsed identifier.
    ///
    /// # Errors
    ///
    /// Returns a `400` [`ApiError`] when the identifier is missing or not an
    /// integer.
    pub fn require_task_id(&self) -> Result<i64, ApiError> {
        parse_id(self.task_id.as_deref(), "taskId")?
            .ok_or_else(|| ApiError::bad_request("taskId is required"))
    }
}

/// One row of the `GET /tasks` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummaryResponse {
    /// Task identifier.
    pub id: i64,
    /// Task description.
    pub task_name: String,
    /// Elapsed time in whole minutes.
    pub task_time: i64,
    /// `true` when the task has ended.
    pub completed: bool,
}

impl From<&TaskSummary> for TaskSummaryResponse {
    fn from(summary: &TaskSummary) -> Self {
        Self {
            id: summary.id.value(),
            task_name: summary.description.as_str().to_owned(),
            task_time: summary.elapsed_minutes(),
            completed: summary.completed,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn parse_positive(value: Option<&str>, field: &str) -> Result<Option<u32>, ApiError> {
    present(value)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .ok()
                .filter(|parsed| *parsed > 0)
                .ok_or_else(|| ApiError::bad_request(format!("invalid {field} '{raw}'")))
        })
        .transpose()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn parse_id(value: Option<&str>, field: &str) -> Result<Option<i64>, ApiError> {
    present(value)
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| ApiError::bad_request(format!("invalid {field} '{raw}'")))
        })
        .transpose()
}

fn parse_timestamp(value: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    present(value)
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|_| ApiError::bad_request(format!("invalid {field} format '{raw}'")))
        })
        .transpose()
}
