//! re3harvest crate
//!
//! This crate is an implementation detail of the `re3harvest` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod registry;

#[doc(hidden)]
pub mod table;

pub use crate::commands::{Host, run};
