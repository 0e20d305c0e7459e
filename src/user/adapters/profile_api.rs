//! HTTP adapter for the external identity profile lookup.

use crate::user::{
    domain::{Passport, Profile, UserDomainError},
    ports::{ProfileFetcher, ProfileLookupError},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Body returned by the profile lookup on success.
///
/// Every field is optional on the wire so that incomplete answers surface as
/// [`ProfileLookupError::IncompleteProfile`] rather than decoding failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileResponse {
    /// Family name.
    pub surname: Option<String>,
    /// Given name.
    pub name: Option<String>,
    /// Patronymic; may be absent or empty.
    pub patronymic: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Profile fetcher that queries a remote HTTP endpoint.
///
/// Issues `GET {base_url}?passportSerie=SSSS&passportNumber=NNNNNN` and
/// decodes the JSON body. Requests are not retried.
#[derive(Debug, Clone)]
pub struct HttpProfileFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileFetcher {
    /// Creates a fetcher with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] when the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Returns the configured lookup endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch(&self, passport: &Passport) -> Result<Profile, ProfileLookupError> {
        debug!(passport = %passport, url = %self.base_url, "requesting identity profile");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("passportSerie", passport.series()),
                ("passportNumber", passport.number()),
            ])
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    ProfileLookupError::Timeout
                } else {
                    ProfileLookupError::Connection(error.to_string())
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(passport = %passport, status = status.as_u16(), "profile lookup rejected request");
            return Err(ProfileLookupError::UnexpectedStatus(status.as_u16()));
        }

        let body: ProfileResponse = response.json().await.map_err(|error| {
            if error.is_timeout() {
                ProfileLookupError::Timeout
            } else {
                ProfileLookupError::MalformedBody(error.to_string())
            }
        })?;
        into_profile(body)
    }
}

/// Converts a decoded lookup body into a validated profile.
///
/// # Errors
///
/// Returns [`ProfileLookupError::IncompleteProfile`] naming the first
/// mandatory field that is missing or blank.
pub fn into_profile(body: ProfileResponse) -> Result<Profile, ProfileLookupError> {
    let ProfileResponse {
        surname,
        name,
        patronymic,
        address,
    } = body;
    Profile::new(
        surname.unwrap_or_default(),
        name.unwrap_or_default(),
        patronymic,
        address.unwrap_or_default(),
    )
    .map_err(|err| match err {
        UserDomainError::BlankField(field) => ProfileLookupError::IncompleteProfile(field),
        other => ProfileLookupError::MalformedBody(other.to_string()),
    })
}
