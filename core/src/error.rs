//! Error types for the café service client.
//!
//! # Design
//! `NotFound` gets its own variant because reservation lookups distinguish
//! "no such booking" from "the service misbehaved". `Transport` carries
//! failures the host hit before any response existed, so both reservation and
//! catalog flows see a single error type for every remote failure.

use thiserror::Error;

/// Errors returned by `CafeClient` parse methods and host transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connect, timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}
