// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use skyfare_domain::DomainError;

/// Errors that can occur while ingesting external payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The payload could not be decoded into the expected shape.
    Decode(String),
    /// The provider answered, but reported a failure.
    Backend(String),
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "Decode error: {msg}"),
            Self::Backend(msg) => write!(f, "Backend error: {msg}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
