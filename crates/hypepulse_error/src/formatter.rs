//! Stat formatter errors.

/// Specific formatter error conditions.
///
/// Missing or oddly shaped stat fields are never errors; they are rendered
/// with defaults. Only an unusable formatter configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FormatterErrorKind {
    /// Page length must be at least one character.
    #[display("Invalid page length: {}", _0)]
    InvalidPageLength(usize),
}

/// Formatter error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Formatter Error: {} at line {} in {}", kind, line, file)]
pub struct FormatterError {
    kind: FormatterErrorKind,
    line: u32,
    file: &'static str,
}

impl FormatterError {
    /// Create a new formatter error with caller location tracking.
    #[track_caller]
    pub fn new(kind: FormatterErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FormatterErrorKind {
        &self.kind
    }
}

/// Result type for formatter operations.
pub type FormatterResult<T> = Result<T, FormatterError>;
