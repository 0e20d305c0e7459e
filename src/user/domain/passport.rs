//! Validated passport identifier.

use super::UserDomainError;
use std::fmt;

/// Number of characters in a passport series.
const SERIES_LENGTH: usize = 4;

/// Number of characters in a passport number.
const NUMBER_LENGTH: usize = 6;

/// Passport identifier made of a numeric series and a numeric number.
///
/// The canonical textual form is `"SSSS NNNNNN"`: the series, one space, and
/// the number. This is also the form stored in the `passport_number` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Passport {
    series: String,
    number: String,
}

impl Passport {
    /// Parses a passport from two whitespace-separated tokens.
    ///
    /// Surrounding and repeated whitespace between the tokens is tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidPassportFormat`] unless the input
    /// holds exactly a 4-character token followed by a 6-character token,
    /// [`UserDomainError::InvalidPassportSeries`] when the series is not all
    /// decimal digits, and [`UserDomainError::InvalidPassportNumber`] when
    /// the number is not all decimal digits.
    pub fn parse(value: &str) -> Result<Self, UserDomainError> {
        let mut tokens = value.split_whitespace();
        let (Some(series), Some(number), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(UserDomainError::InvalidPassportFormat(value.to_owned()));
        };

        if series.chars().count() != SERIES_LENGTH || number.chars().count() != NUMBER_LENGTH {
            return Err(UserDomainError::InvalidPassportFormat(value.to_owned()));
        }
        if !is_decimal(series) {
            return Err(UserDomainError::InvalidPassportSeries(series.to_owned()));
        }
        if !is_decimal(number) {
            return Err(UserDomainError::InvalidPassportNumber(number.to_owned()));
        }

        Ok(Self {
            series: series.to_owned(),
            number: number.to_owned(),
        })
    }

    /// Returns the 4-digit series.
    #[must_use]
    pub fn series(&self) -> &str {
        &self.series
    }

    /// Returns the 6-digit number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }
}

fn is_decimal(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for Passport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.series, self.number)
    }
}
