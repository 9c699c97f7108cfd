//! Upstream (identity and stats service) errors.

use derive_getters::Getters;

/// The upstream lookup an error originated from.
///
/// The display form is the prefix shown to users in front of the error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UpstreamCall {
    /// Username to UUID resolution against the identity service.
    #[display("Error fetching UUID")]
    Identity,
    /// Player record lookup against the stats service.
    #[display("Error fetching Hypixel player data")]
    Player,
    /// Recent games lookup against the stats service.
    #[display("Error fetching recent games")]
    RecentGames,
    /// Guild lookup against the stats service.
    #[display("Error fetching guild info")]
    Guild,
}

/// Specific upstream error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// Definitive negative answer from the upstream. Never retried.
    #[display("{}", _0)]
    NotFound(String),

    /// Transient failures exhausted the retry budget.
    #[display("{}", _0)]
    UpstreamUnavailable(String),

    /// The upstream answered successfully but without the expected structure.
    #[display("{}", _0)]
    MalformedResponse(String),

    /// The upstream refused the request (invalid key, bad identifier). Never retried.
    #[display("{}", body)]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the upstream
        body: String,
    },
}

/// Upstream error with the originating call and source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Upstream Error: {}: {} at line {} in {}", call, kind, line, file)]
pub struct UpstreamError {
    call: UpstreamCall,
    kind: UpstreamErrorKind,
    line: u32,
    file: &'static str,
}

impl UpstreamError {
    /// Create a new upstream error with caller location tracking.
    #[track_caller]
    pub fn new(call: UpstreamCall, kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            call,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Message suitable for showing to the user who issued the command.
    ///
    /// ```
    /// use hypepulse_error::{UpstreamCall, UpstreamError, UpstreamErrorKind};
    ///
    /// let err = UpstreamError::new(
    ///     UpstreamCall::Guild,
    ///     UpstreamErrorKind::NotFound("Guild not found for this player.".to_string()),
    /// );
    /// assert_eq!(err.user_message(), "Error fetching guild info: Guild not found for this player.");
    /// ```
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.call, self.kind)
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
