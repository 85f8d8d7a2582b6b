use std::num::{ParseFloatError, ParseIntError};

use crate::value::ValueKind;

/// A variant of this enum is returned when an argument or command is declared incorrectly.
///
/// These surface before any command line is parsed.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationError {
    #[error("{0}: long argument must start with two or none '-'")]
    LongName(String),
    #[error("{0}: short argument must start with single '-'")]
    ShortName(String),
    #[error("unsupported type '{0}'")]
    UnsupportedType(String),
    #[error("{name}: invalid default value type, must be '{expected}'")]
    DefaultType {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("{0}: already exists")]
    AlreadyExists(String),
}

/// Why a token could not be converted
#[derive(Debug, thiserror::Error)]
pub enum ConversionFailure {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error("expected one of true, yes, on, 1, false, no, off, 0")]
    Bool,
    /// The numeral overflows to infinity or a nonzero numeral underflows to zero
    #[error("value out of range")]
    OutOfRange,
}

/// Returned when a token cannot be turned into a value of the declared type
#[derive(Debug, thiserror::Error)]
#[error("invalid {kind} value '{text}'")]
pub struct ConversionError {
    text: String,
    kind: ValueKind,
    #[source]
    reason: ConversionFailure,
}

impl ConversionError {
    pub(crate) fn new(text: &str, kind: ValueKind, reason: ConversionFailure) -> Self {
        ConversionError {
            text: text.to_string(),
            kind,
            reason,
        }
    }

    /// The offending token
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The type the token was converted to
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn reason(&self) -> &ConversionFailure {
        &self.reason
    }
}

/// A variant of this enum is returned when the command line does not match the declared
/// arguments
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("unknown argument '{0}'")]
    UnknownOption(String),
    #[error("{0}: expected argument")]
    ExpectedValue(String),
    #[error("{0}: unknown argument")]
    UnexpectedPositional(String),
}

/// Any error the crate returns
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// Not produced while parsing. Lets callers of [`Argument::set_value`] use `?`.
    ///
    /// [`Argument::set_value`]: crate::Argument::set_value
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// A conversion failed while parsing; `token` is what selected the argument
    #[error("{token}: {source}")]
    InvalidValue {
        token: String,
        source: ConversionError,
    },
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
