//! Error types for the BIR lookup flow.

use thiserror::Error;

/// Failure kinds surfaced by the BIR client.
///
/// Logout failures are deliberately not represented here: the client
/// swallows them so they can never replace the primary search outcome.
#[derive(Debug, Error)]
pub enum BirError {
    /// The input did not reduce to a 10-digit NIP.
    #[error("NIP must be 10 digits after stripping separators, got {0:?}")]
    InvalidNip(String),

    /// Zaloguj returned no session token; the access key was rejected.
    #[error("BIR login rejected: {0}")]
    Authentication(String),

    /// Network or HTTP-level failure talking to the endpoint.
    #[error("BIR endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with something that is not well-formed XML.
    #[error("malformed BIR response: {0}")]
    MalformedResponse(String),
}

impl From<quick_xml::Error> for BirError {
    fn from(err: quick_xml::Error) -> Self {
        BirError::MalformedResponse(err.to_string())
    }
}
