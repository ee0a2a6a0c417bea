//! Error types for the engine's fallible operations.
//!
//! The core search, word and line operations never fail: they clamp or do
//! nothing. Errors exist only where the engine validates a value typed in by
//! the user: an explicit selection range and `--set` option directives.

use thiserror::Error;

/// Rejected explicit range selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectBoundsError {
    #[error("Invalid range {start}..{end}: start must be before end")]
    InvalidRange { start: usize, end: usize },

    #[error("Offset {offset} is past the end of the buffer (length {len})")]
    OutOfBounds { offset: usize, len: usize },
}

/// Rejected `--set` directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Unknown option: {0}")]
    Unknown(String),

    #[error("Not a boolean option: {0}")]
    NotBoolean(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            SelectBoundsError::InvalidRange { start: 5, end: 2 }.to_string(),
            "Invalid range 5..2: start must be before end"
        );
        assert_eq!(
            SelectBoundsError::OutOfBounds { offset: 9, len: 4 }.to_string(),
            "Offset 9 is past the end of the buffer (length 4)"
        );
        assert_eq!(OptionError::Unknown("wat".into()).to_string(), "Unknown option: wat");
        assert_eq!(
            OptionError::InvalidValue {
                name: "history".into(),
                value: "0".into()
            }
            .to_string(),
            "Invalid value for history: 0"
        );
    }
}
