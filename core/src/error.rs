//! Parse error taxonomy.

use thiserror::Error;

/// A failed parse of the argument vector.
///
/// Lexical errors (`UnknownFlag` through `InvalidFlagSyntax`) are detected
/// purely from token shape and registry lookup; `Callback` wraps a value
/// sink failure. Every variant halts parsing immediately, and the argument
/// vector is only guaranteed to be compacted up to the failing token.
///
/// [`code`](Self::code) maps each variant onto the stable negative return
/// codes of [`FlagSet::parse`](crate::FlagSet::parse).
///
/// # Examples
///
/// ```
/// use cliflag_core::{FlagSet, ParseError};
///
/// let flags = FlagSet::new("prog");
/// let mut args: Vec<String> = ["prog", "--bogus"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
///
/// let err = flags.try_parse(&mut args).unwrap_err();
/// assert_eq!(err, ParseError::UnknownFlag { token: "--bogus".to_string() });
/// assert_eq!(err.code(), -1);
/// assert_eq!(err.to_string(), "unknown option --bogus");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token names no registered flag.
    #[error("unknown option {token}")]
    UnknownFlag {
        /// The offending flag token, without any attached `=value`.
        token: String,
    },
    /// An argument was attached to a flag that takes none.
    #[error("option {token} doesn't allow an argument")]
    RedundantArgument {
        /// The offending flag token, without the attached `=value`.
        token: String,
    },
    /// A flag requiring an argument had none attached and no next token.
    #[error("option {token} requires an argument")]
    MissingArgument {
        /// The offending flag token.
        token: String,
    },
    /// A token with flag shape but no possible name, such as `--=value`.
    #[error("invalid option {token}")]
    InvalidFlagSyntax {
        /// The offending token.
        token: String,
    },
    /// A value sink rejected the extracted argument.
    #[error("option {name}: {reason}")]
    Callback {
        /// The flag token as typed.
        name: String,
        /// The sink's conversion failure message.
        reason: String,
    },
}

impl ParseError {
    /// Returns the C-style negative return code for this error.
    ///
    /// The callback code is deliberately generic: the conversion failure
    /// reason is visible only in the message, never in the code.
    pub fn code(&self) -> i32 {
        match self {
            Self::UnknownFlag { .. } => -1,
            Self::RedundantArgument { .. } => -2,
            Self::MissingArgument { .. } => -3,
            Self::InvalidFlagSyntax { .. } => -4,
            Self::Callback { .. } => -5,
        }
    }
}
