//! Error types for the request executor.
//!
//! # Design
//! Each pipeline stage has its own variant carrying the underlying cause as
//! its `source()`, so callers can tell where a request failed without parsing
//! messages. Validation failures carry nothing; they happen before any I/O.

use std::fmt;

use thiserror::Error;

/// Boxed error returned by pluggable parts: transports, codecs and handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which status handler produced a value of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerKind {
    /// Handler registered for a specific status, named by its status line.
    Registered(String),
    /// The fallback handler for statuses without a registered handler.
    Default,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Registered(status) => write!(f, "{status} HTTP status handler"),
            HandlerKind::Default => f.write_str("default HTTP status handler"),
        }
    }
}

/// Errors returned by [`Request::send`](crate::Request::send) and
/// [`fetch`](crate::fetch).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no URL specified")]
    MissingUrl,

    #[error("no HTTP verb/method specified")]
    MissingMethod,

    /// The configured serializer rejected the request body.
    #[error("request body serialization failed: {0}")]
    Serialization(#[source] BoxError),

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(#[source] BoxError),

    /// The success response body could not be read.
    #[error("reading response body failed: {0}")]
    ReadBody(#[source] std::io::Error),

    /// The configured deserializer rejected the success response body.
    #[error("response body deserialization failed: {0}")]
    Deserialization(#[source] BoxError),

    /// A status handler returned an error.
    #[error("status handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error("{handler} does not return {expected} type value")]
    HandlerTypeMismatch {
        handler: HandlerKind,
        expected: &'static str,
    },
}
