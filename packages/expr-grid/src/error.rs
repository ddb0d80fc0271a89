//! Evaluation and parse errors

use thiserror::Error;

use crate::value::ValueKind;

pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors raised while constructing or evaluating values and expressions.
///
/// None of these are recovered inside the evaluator; they surface to the
/// caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("type mismatch: {operation} expects numeric operands, found {found}")]
    TypeMismatch {
        operation: &'static str,
        found: ValueKind,
    },

    #[error("no addition handler for {left} + {right}")]
    UnhandledCombination { left: ValueKind, right: ValueKind },

    #[error("integer overflow in {operation}")]
    Overflow { operation: &'static str },
}

impl EvalError {
    pub fn zero_denominator(numerator: i64) -> Self {
        EvalError::InvalidArgument(format!("zero denominator in {}/0", numerator))
    }

    pub fn overflow(operation: &'static str) -> Self {
        EvalError::Overflow { operation }
    }
}

/// Error produced by the text parser, positioned at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected {found} at {index}, expected {expected}")]
    UnexpectedToken {
        index: usize,
        found: String,
        expected: &'static str,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unterminated string starting at {index}")]
    UnterminatedString { index: usize },

    #[error("unexpected character '{ch}' at {index}")]
    UnexpectedCharacter { index: usize, ch: char },

    #[error("invalid literal at {index}: {source}")]
    InvalidLiteral {
        index: usize,
        #[source]
        source: EvalError,
    },

    #[error("integer literal out of range at {index}")]
    NumberOutOfRange { index: usize },

    #[error("expression nested too deeply at {index}")]
    TooDeep { index: usize },
}

impl ParseError {
    /// Byte offset in the input the error points at, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { index, .. }
            | ParseError::UnterminatedString { index }
            | ParseError::UnexpectedCharacter { index, .. }
            | ParseError::InvalidLiteral { index, .. }
            | ParseError::NumberOutOfRange { index }
            | ParseError::TooDeep { index } => Some(*index),
            ParseError::UnexpectedEnd { .. } => None,
        }
    }
}
