//! Core types shared by every layer of Argot.
//!
//! This crate provides:
//! - [`StringRange`] - A half-open byte range into command input
//! - [`Error`] - Rich error types with scanner context
//! - [`Result`] - The crate-wide result alias

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod range;

pub use error::{Error, ErrorContext, ErrorKind, NumberKind, Result};
pub use range::StringRange;
