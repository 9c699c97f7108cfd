//! Top-level error wrapper types.

use crate::{ConfigError, FormatterError, HttpError, UpstreamError};

/// Every error a HypePulse command or the bootstrap can produce.
///
/// # Examples
///
/// ```
/// use hypepulse_error::{ConfigError, HypePulseError};
///
/// let err: HypePulseError = ConfigError::new("Missing field").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HypePulseErrorKind {
    /// Identity or stats service error
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Stat formatter error
    #[from(FormatterError)]
    Formatter(FormatterError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP transport setup error
    #[from(HttpError)]
    Http(HttpError),
}

/// HypePulse error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("HypePulse Error: {}", _0)]
pub struct HypePulseError(Box<HypePulseErrorKind>);

impl HypePulseError {
    /// Create a new error from a kind.
    pub fn new(kind: HypePulseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HypePulseErrorKind {
        &self.0
    }

    /// Message shown to the user, without source locations.
    pub fn user_message(&self) -> String {
        match self.kind() {
            HypePulseErrorKind::Upstream(e) => e.user_message(),
            HypePulseErrorKind::Formatter(e) => e.kind().to_string(),
            HypePulseErrorKind::Config(e) => e.message.clone(),
            HypePulseErrorKind::Http(e) => e.message.clone(),
        }
    }
}

// Generic From implementation for any type that converts to HypePulseErrorKind
impl<T> From<T> for HypePulseError
where
    T: Into<HypePulseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for HypePulse operations.
pub type HypePulseResult<T> = std::result::Result<T, HypePulseError>;
