use thiserror::Error;

/// Why a well-formed code was not accepted.
///
/// These are ordinary outcomes, not failures: the record is still persisted so
/// the consumed attempt is remembered, and the person can try again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("too many witness code attempts, try again later")]
    TooManyAttempts,

    #[error("witness code does not match")]
    CodeMismatch,

    #[error("witness code has expired")]
    CodeExpired,
}

impl Rejection {
    /// Message key shown against the code field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TooManyAttempts => "tooManyWitnessCodeAttempts",
            Self::CodeMismatch => "witnessCodeDoesNotMatch",
            Self::CodeExpired => "witnessCodeExpired",
        }
    }
}

/// A submitted value that never reaches verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("enter the witness code")]
    Missing,

    #[error("witness code must be {expected} characters")]
    WrongLength { expected: usize },
}

impl InputError {
    /// Kind of field error, used by the display layer to pick a message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "enter",
            Self::WrongLength { .. } => "length",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_labels_are_distinct() {
        let labels = [
            Rejection::TooManyAttempts.label(),
            Rejection::CodeMismatch.label(),
            Rejection::CodeExpired.label(),
        ];
        assert_ne!(labels[0], labels[1]);
        assert_ne!(labels[1], labels[2]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn input_error_display_includes_length() {
        let err = InputError::WrongLength { expected: 4 };
        assert_eq!(err.to_string(), "witness code must be 4 characters");
        assert_eq!(err.kind(), "length");
    }
}
