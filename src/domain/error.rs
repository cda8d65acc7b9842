//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid input to a location lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("invalid city id: {0:?} is not a decimal integer")]
    InvalidCityId(String),
}

/// Failures reported by a location lookup collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no location for country code {0:?}")]
    UnknownCountry(String),

    #[error("no location for state code {state:?} in country {country:?}")]
    UnknownState { country: String, state: String },

    #[error("no location for city id {city_id} in {country}/{state}")]
    UnknownCity {
        country: String,
        state: String,
        city_id: i64,
    },

    #[error("location lookup unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    /// True when the collaborator answered but nothing matched.
    pub fn is_miss(&self) -> bool {
        !matches!(self, LookupError::Unavailable(_))
    }
}
