//! The module contains the errors the list controller can surface.
//!
//! The errors are:
//!
//! - [`ApiError`] returned by a [`GastosApi`] call that did not succeed.
//! - [`FormError`] returned when the edit form cannot be turned back into a
//!   record.
//!
//!  [`GastosApi`]: super::api::GastosApi
use thiserror::Error;

/// Backend failures, classified by HTTP status.
///
/// Every variant is terminal for the controller: there are no retries and no
/// distinction between transient and permanent failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Edit form errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("\"{field}\" must be a number: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("\"{0}\" is required")]
    Required(&'static str),
}
