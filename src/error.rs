//! The error type returned by every bind operation.
//!
//! Errors that are already reported on the binder's error stream (missing
//! mandatory fields, flag parse failures) are not printed again by the
//! [`Termination`](std::process::Termination) impl.

use std::fmt;
use std::io;

use camino::Utf8PathBuf;

use crate::missing::MissingField;
use crate::provenance::SourceKind;
use crate::schema::FieldKind;

/// Error returned by the binder.
///
/// `Help` is not an error in the traditional sense: it is returned when the
/// user asked for usage text, and maps to exit code 0.
#[non_exhaustive]
pub enum BindError {
    /// The field descriptors are unusable (empty field name, flag defined twice).
    InvalidArgument {
        /// What was wrong with the descriptors.
        message: String,
    },

    /// A value could not be converted to the declared field kind.
    Coercion {
        /// Where the value came from.
        source: SourceKind,
        /// The file name, environment variable or flag that carried the value.
        key: String,
        /// The raw value.
        value: String,
        /// The kind the field was declared with.
        expected: FieldKind,
    },

    /// A configuration file or directory exists but could not be read.
    SourceRead {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        error: io::Error,
    },

    /// The command line could not be parsed.
    FlagParse {
        /// Parser message, e.g. `flag needs an argument: -port`.
        message: String,
    },

    /// One or more mandatory fields were not set by any source.
    MandatoryMissing {
        /// Every field that was left unset, in declaration order.
        missing: Vec<MissingField>,
    },

    /// Help was requested with `-h` or `-help`.
    Help {
        /// Generated usage text.
        text: String,
    },
}

impl BindError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BindError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns the appropriate process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BindError::Help { .. } => 0,
            BindError::FlagParse { .. } => 2,
            _ => 1,
        }
    }

    /// Returns true if this is a help request.
    pub fn is_help(&self) -> bool {
        matches!(self, BindError::Help { .. })
    }

    /// Number of missing mandatory fields, if this is a mandatory-check failure.
    pub fn missing_count(&self) -> Option<usize> {
        match self {
            BindError::MandatoryMissing { missing } => Some(missing.len()),
            _ => None,
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::InvalidArgument { message } => write!(f, "invalid argument: {message}"),
            BindError::Coercion {
                source,
                key,
                value,
                expected,
            } => write!(
                f,
                "{source} {key} must be {} - instead it is: {value}",
                expected.article_name()
            ),
            BindError::SourceRead { path, error } => {
                write!(f, "could not read {path}: {error}")
            }
            BindError::FlagParse { message } => write!(f, "{message}"),
            BindError::MandatoryMissing { missing } => {
                write!(f, "{} mandatory parameters missing", missing.len())
            }
            BindError::Help { text } => write!(f, "{text}"),
        }
    }
}

impl fmt::Debug for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindError::SourceRead { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl std::process::Termination for BindError {
    fn report(self) -> std::process::ExitCode {
        match &self {
            BindError::Help { text } => print!("{text}"),
            // Already written to the binder's error stream along with usage.
            BindError::MandatoryMissing { .. } | BindError::FlagParse { .. } => {}
            other => eprintln!("error: {other}"),
        }
        std::process::ExitCode::from(self.exit_code() as u8)
    }
}
