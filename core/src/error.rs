//! Error types for the todo API client.
//!
//! # Design
//! `ApiError` describes what went wrong on the wire. The dispatcher never
//! shows it to callers directly: every remote failure of a mutation collapses
//! into `DispatchError::RemoteOperationFailed`, which keeps the `ApiError` as
//! its source for diagnostics.

use thiserror::Error;

use crate::intent::IntentKind;

/// Errors returned by transports and by `TodoClient` parse methods.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response was obtained: connection refused, DNS failure, broken body.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors returned by `TodoClient::dispatch` and `Intent::from_fields`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The intent was malformed. Raised before any I/O.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backend rejected the mutation or could not be reached.
    #[error("failed to {kind} todo")]
    RemoteOperationFailed {
        kind: IntentKind,
        #[source]
        source: ApiError,
    },
}

impl DispatchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        DispatchError::InvalidInput(reason.into())
    }
}
