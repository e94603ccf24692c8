// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A city or airport code is not three ASCII letters.
    InvalidIataCode(String),
    /// An airline code is empty or malformed.
    InvalidAirlineCode(String),
    /// A currency code is not three uppercase ASCII letters.
    InvalidCurrency(String),
    /// The return leg departs before the outbound leg.
    ReturnBeforeDeparture {
        /// The outbound departure, RFC 3339.
        departure_at: String,
        /// The offending return, RFC 3339.
        return_at: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIataCode(code) => {
                write!(f, "Invalid IATA code '{code}': expected three letters")
            }
            Self::InvalidAirlineCode(code) => write!(f, "Invalid airline code '{code}'"),
            Self::InvalidCurrency(code) => {
                write!(f, "Invalid currency '{code}': expected an ISO-4217 code")
            }
            Self::ReturnBeforeDeparture {
                departure_at,
                return_at,
            } => {
                write!(
                    f,
                    "Return at {return_at} is earlier than departure at {departure_at}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
