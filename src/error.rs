use thiserror::Error;

/// Main error type for the SMITCH extractor.
/// Aggregates errors from the grid builder, window parsing and value coercion.
#[derive(Error, Debug)]
pub enum SmitchError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),

    // Third-party library errors
    #[error("{0}")]
    ParseDateTimeError(#[from] chrono::ParseError),

    // Spreadsheet module errors
    #[error("{0}")]
    GridError(#[from] crate::spreadsheet::GridError),

    #[error("{0}")]
    RangeError(#[from] crate::spreadsheet::range::RangeError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SmitchError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SmitchError::WithContextError(format!("{}: {}", message, e)))
    }
}
