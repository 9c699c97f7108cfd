//! Error types for HypePulse.
//!
//! This crate provides the error types shared across the HypePulse workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use hypepulse_error::{HypePulseResult, UpstreamCall, UpstreamError, UpstreamErrorKind};
//!
//! fn lookup() -> HypePulseResult<String> {
//!     Err(UpstreamError::new(
//!         UpstreamCall::Identity,
//!         UpstreamErrorKind::NotFound("Username not found in Mojang API.".to_string()),
//!     ))?
//! }
//!
//! let err = lookup().unwrap_err();
//! assert_eq!(
//!     err.user_message(),
//!     "Error fetching UUID: Username not found in Mojang API."
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod formatter;
mod http;
mod upstream;

pub use config::ConfigError;
pub use error::{HypePulseError, HypePulseErrorKind, HypePulseResult};
pub use formatter::{FormatterError, FormatterErrorKind, FormatterResult};
pub use http::HttpError;
pub use upstream::{UpstreamCall, UpstreamError, UpstreamErrorKind, UpstreamResult};
