// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use skyfare::CoreError;
use skyfare_domain::DomainError;
use skyfare_persistence::PersistenceError;
use thiserror::Error;

/// Failures of a fetch against the fare provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No API token is configured. Raised before any network call.
    #[error("No API token configured")]
    NoToken,
    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    BadUrl(String),
    /// The request never produced an HTTP response.
    #[error("Transport failure: {0}")]
    Transport(String),
    /// The provider answered with a non-2xx status.
    #[error("Unexpected HTTP status {0}")]
    BadStatus(u16),
    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
    /// The provider reported `success: false`.
    #[error("Provider error: {0}")]
    Backend(String),
}

impl From<CoreError> for FetchError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Decode(msg) => Self::Decode(msg),
            CoreError::Backend(msg) => Self::Backend(msg),
            CoreError::DomainViolation(domain_err) => Self::Decode(domain_err.to_string()),
        }
    }
}

/// API-level errors.
///
/// These are distinct from fetch/core/persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A newer request for the same key started before this one finished.
    Superseded {
        /// The sequencing key.
        key: String,
    },
    /// The fare provider could not be reached or answered badly.
    Upstream(FetchError),
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Superseded { key } => {
                write!(f, "Request '{key}' was superseded by a newer one")
            }
            Self::Upstream(err) => write!(f, "Upstream error: {err}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::Upstream(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidIataCode(code) => ApiError::InvalidInput {
            field: String::from("city"),
            message: format!("'{code}' is not a three-letter IATA code"),
        },
        DomainError::InvalidAirlineCode(code) => ApiError::InvalidInput {
            field: String::from("airline"),
            message: format!("'{code}' is not an airline designator"),
        },
        DomainError::InvalidCurrency(code) => ApiError::InvalidInput {
            field: String::from("currency"),
            message: format!("'{code}' is not an ISO-4217 currency code"),
        },
        DomainError::ReturnBeforeDeparture {
            departure_at,
            return_at,
        } => ApiError::InvalidInput {
            field: String::from("return_at"),
            message: format!("Return at {return_at} is earlier than departure at {departure_at}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures storage details are not
/// leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ScanNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Scan"),
            message: format!("No scan with id {id}"),
        },
        PersistenceError::InvalidRecord(msg) => ApiError::InvalidInput {
            field: String::from("raw_text"),
            message: msg,
        },
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}
