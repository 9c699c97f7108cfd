//! Discord-specific error types.

use derive_getters::Getters;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Registering slash commands failed.
    #[display("Command registration failed: {_0}")]
    RegistrationFailed(String),

    /// Message failed to send or update.
    #[display("Message send failed: {_0}")]
    MessageSendFailed(String),

    /// Interaction (slash command, button) failed.
    #[display("Interaction failed: {_0}")]
    InteractionFailed(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use hypepulse_social::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InteractionFailed("expired".into()));
    /// assert!(err.to_string().contains("Interaction failed: expired"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;
