//! Error types for the Argot system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Number of input characters shown before the cursor in error excerpts.
const CONTEXT_AMOUNT: usize = 10;

/// The main error type for Argot operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{}", .context.as_ref().map(ToString::to_string).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where in the input the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the cursor position recorded in the context, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.context.as_ref().map(|ctx| ctx.cursor)
    }

    /// Creates an "expected quote to start a string" error.
    #[must_use]
    pub fn expected_start_of_quote() -> Self {
        Self::new(ErrorKind::ExpectedStartOfQuote)
    }

    /// Creates an "unclosed quoted string" error.
    #[must_use]
    pub fn expected_end_of_quote() -> Self {
        Self::new(ErrorKind::ExpectedEndOfQuote)
    }

    /// Creates an invalid escape sequence error.
    #[must_use]
    pub fn invalid_escape(escaped: char) -> Self {
        Self::new(ErrorKind::InvalidEscape(escaped))
    }

    /// Creates an "expected integer" error.
    #[must_use]
    pub fn expected_int() -> Self {
        Self::new(ErrorKind::ExpectedInt)
    }

    /// Creates an invalid integer error.
    #[must_use]
    pub fn invalid_int(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInt(value.into()))
    }

    /// Creates an "expected long" error.
    #[must_use]
    pub fn expected_long() -> Self {
        Self::new(ErrorKind::ExpectedLong)
    }

    /// Creates an invalid long error.
    #[must_use]
    pub fn invalid_long(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidLong(value.into()))
    }

    /// Creates an "expected double" error.
    #[must_use]
    pub fn expected_double() -> Self {
        Self::new(ErrorKind::ExpectedDouble)
    }

    /// Creates an invalid double error.
    #[must_use]
    pub fn invalid_double(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDouble(value.into()))
    }

    /// Creates an "expected float" error.
    #[must_use]
    pub fn expected_float() -> Self {
        Self::new(ErrorKind::ExpectedFloat)
    }

    /// Creates an invalid float error.
    #[must_use]
    pub fn invalid_float(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFloat(value.into()))
    }

    /// Creates an "expected boolean" error.
    #[must_use]
    pub fn expected_bool() -> Self {
        Self::new(ErrorKind::ExpectedBool)
    }

    /// Creates an invalid boolean error.
    #[must_use]
    pub fn invalid_bool(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidBool(value.into()))
    }

    /// Creates an "expected symbol" error.
    #[must_use]
    pub fn expected_symbol(symbol: char) -> Self {
        Self::new(ErrorKind::ExpectedSymbol(symbol))
    }

    /// Creates an "expected literal" error.
    #[must_use]
    pub fn expected_literal(literal: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExpectedLiteral(literal.into()))
    }

    /// Creates an "expected argument separator" error.
    #[must_use]
    pub fn expected_separator() -> Self {
        Self::new(ErrorKind::ExpectedSeparator)
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn unknown_command() -> Self {
        Self::new(ErrorKind::UnknownCommand)
    }

    /// Creates an "incorrect argument" error for input left over after a
    /// partial match.
    #[must_use]
    pub fn incorrect_argument() -> Self {
        Self::new(ErrorKind::IncorrectArgument)
    }

    /// Creates a not-executable error for the given node usage.
    #[must_use]
    pub fn not_executable(usage: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotExecutable(usage.into()))
    }

    /// Creates an incomplete argument error.
    #[must_use]
    pub fn incomplete_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompleteArgument(message.into()))
    }

    /// Creates an unknown argument error.
    #[must_use]
    pub fn unknown_argument(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownArgument(name.into()))
    }

    /// Creates an argument type mismatch error.
    #[must_use]
    pub fn argument_type_mismatch(name: impl Into<String>, expected: &'static str) -> Self {
        Self::new(ErrorKind::ArgumentTypeMismatch {
            name: name.into(),
            expected,
        })
    }

    /// Creates a handler-reported failure.
    #[must_use]
    pub fn command_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CommandFailed(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Creates a "value below minimum" error for the given numeric kind.
    #[must_use]
    pub fn too_low(kind: NumberKind, found: impl fmt::Display, min: impl fmt::Display) -> Self {
        Self::new(ErrorKind::TooLow {
            kind,
            found: found.to_string(),
            min: min.to_string(),
        })
    }

    /// Creates a "value above maximum" error for the given numeric kind.
    #[must_use]
    pub fn too_high(kind: NumberKind, found: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(ErrorKind::TooHigh {
            kind,
            found: found.to_string(),
            max: max.to_string(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A quoted string was required but no quote was found.
    #[error("expected quote to start a string")]
    ExpectedStartOfQuote,

    /// A quoted string was never closed.
    #[error("unclosed quoted string")]
    ExpectedEndOfQuote,

    /// A backslash escaped something other than the quote or a backslash.
    #[error("invalid escape sequence '\\{0}' in quoted string")]
    InvalidEscape(char),

    /// An integer was required.
    #[error("expected integer")]
    ExpectedInt,

    /// Numeric characters did not form a valid integer.
    #[error("invalid integer '{0}'")]
    InvalidInt(String),

    /// A long was required.
    #[error("expected long")]
    ExpectedLong,

    /// Numeric characters did not form a valid long.
    #[error("invalid long '{0}'")]
    InvalidLong(String),

    /// A double was required.
    #[error("expected double")]
    ExpectedDouble,

    /// Numeric characters did not form a valid double.
    #[error("invalid double '{0}'")]
    InvalidDouble(String),

    /// A float was required.
    #[error("expected float")]
    ExpectedFloat,

    /// Numeric characters did not form a valid float.
    #[error("invalid float '{0}'")]
    InvalidFloat(String),

    /// A boolean was required.
    #[error("expected bool")]
    ExpectedBool,

    /// A word was read where a boolean was expected.
    #[error("invalid bool, expected true or false but found '{0}'")]
    InvalidBool(String),

    /// A specific character was required.
    #[error("expected '{0}'")]
    ExpectedSymbol(char),

    /// A numeric argument was below its minimum.
    #[error("{kind} must not be less than {min}, found {found}")]
    TooLow {
        /// Which numeric argument kind was checked.
        kind: NumberKind,
        /// The value that was read.
        found: String,
        /// The inclusive minimum.
        min: String,
    },

    /// A numeric argument was above its maximum.
    #[error("{kind} must not be more than {max}, found {found}")]
    TooHigh {
        /// Which numeric argument kind was checked.
        kind: NumberKind,
        /// The value that was read.
        found: String,
        /// The inclusive maximum.
        max: String,
    },

    /// A literal node did not match the input.
    #[error("expected literal {0}")]
    ExpectedLiteral(String),

    /// A node matched but was followed by something other than a separator.
    #[error("expected whitespace to end one argument, but found trailing data")]
    ExpectedSeparator,

    /// Nothing in the grammar matched the input.
    #[error("unknown command")]
    UnknownCommand,

    /// Part of the input matched but the rest did not.
    #[error("incorrect argument for command")]
    IncorrectArgument,

    /// The input ended on a node without a handler.
    #[error("incomplete command: '{0}' is not executable")]
    NotExecutable(String),

    /// A multi-part argument ended early.
    #[error("incomplete argument: {0}")]
    IncompleteArgument(String),

    /// A handler asked for an argument that was not captured.
    #[error("no such argument '{0}' exists on this command")]
    UnknownArgument(String),

    /// A captured argument holds a different type than requested.
    #[error("argument '{name}' is not of type {expected}")]
    ArgumentTypeMismatch {
        /// The argument name.
        name: String,
        /// The requested type name.
        expected: &'static str,
    },

    /// A command handler reported a failure.
    #[error("{0}")]
    CommandFailed(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// The numeric argument kinds that carry range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

/// Context about where in the input an error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// The full input being parsed.
    pub input: String,
    /// Byte offset of the cursor when the error was raised.
    pub cursor: usize,
}

impl ErrorContext {
    /// Creates a new context for the given input and cursor.
    #[must_use]
    pub fn new(input: impl Into<String>, cursor: usize) -> Self {
        Self {
            input: input.into(),
            cursor,
        }
    }

    /// Returns up to ten characters of input leading up to the cursor.
    #[must_use]
    pub fn excerpt(&self) -> String {
        let cursor = self.cursor.min(self.input.len());
        let before = self.input.get(..cursor).unwrap_or(&self.input);
        let count = before.chars().count();
        let mut excerpt = String::new();
        if count > CONTEXT_AMOUNT {
            excerpt.push_str("...");
        }
        excerpt.extend(before.chars().skip(count.saturating_sub(CONTEXT_AMOUNT)));
        excerpt
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " at position {}: {}<--[HERE]", self.cursor, self.excerpt())
    }
}

/// Result alias for Argot operations.
pub type Result<T> = std::result::Result<T, Error>;
