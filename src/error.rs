//! Parse errors and process exit codes.
//!
//! Every failure the engine can report is a [`ParseError`]. The `Display`
//! text of each variant is the diagnostic shown to the user.

use thiserror::Error;

/// Exit code for a successful parse and callback.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for any parse error, help display, or failed callback.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No main command is registered and no command token was given.
    #[error("No command given")]
    NoCommandSelectable,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Value text failed the type-directed parse for the option.
    #[error("Failed to parse value: {value} for option: {option}")]
    MalformedValue { value: String, option: String },

    /// A second value was given to an option that accepts only one.
    #[error("Option {option} accepts a single value")]
    DuplicateValueRejected { option: String },

    #[error("Too many {what} (capacity {capacity})")]
    CapacityExceeded { what: &'static str, capacity: usize },

    /// `--help` or `-h` was seen. Signalled like a failure (exit code 1).
    #[error("Help requested")]
    HelpRequested,

    /// The command's callback returned `false`.
    #[error("Command failed")]
    CallbackFailed,
}

impl ParseError {
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }

    /// Whether the parser prints this error's text as a diagnostic.
    ///
    /// Duplicate values are rejected silently, help has already been
    /// rendered, and callbacks report their own failures.
    pub(crate) fn is_reported(&self) -> bool {
        !matches!(
            self,
            ParseError::DuplicateValueRejected { .. }
                | ParseError::HelpRequested
                | ParseError::CallbackFailed
                | ParseError::NoCommandSelectable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_match_user_facing_text() {
        assert_eq!(
            ParseError::UnknownCommand("unknown-cmd".into()).to_string(),
            "Unknown command: unknown-cmd"
        );
        assert_eq!(
            ParseError::UnknownOption("--nope".into()).to_string(),
            "Unknown option: --nope"
        );
        assert_eq!(
            ParseError::MalformedValue {
                value: "200".into(),
                option: "count".into()
            }
            .to_string(),
            "Failed to parse value: 200 for option: count"
        );
    }

    #[test]
    fn every_error_exits_with_failure() {
        assert_eq!(ParseError::HelpRequested.exit_code(), EXIT_FAILURE);
        assert_eq!(ParseError::CallbackFailed.exit_code(), EXIT_FAILURE);
        assert_eq!(ParseError::NoCommandSelectable.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn silent_kinds_are_not_reported() {
        assert!(!ParseError::DuplicateValueRejected { option: "b".into() }.is_reported());
        assert!(!ParseError::HelpRequested.is_reported());
        assert!(ParseError::UnknownOption("-x".into()).is_reported());
        assert!(ParseError::CapacityExceeded { what: "values", capacity: 1 }.is_reported());
    }
}
