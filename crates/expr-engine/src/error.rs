use expr_model::A1ParseError;
use thiserror::Error;

use crate::eval::ParseError;

pub type EvalResult<T> = Result<T, EvalError>;

/// Structural failures that abort an evaluation.
///
/// Coercion problems never show up here: they resolve to sentinel values (NaN, `false`,
/// `None`) and are left for the calling expression to handle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("failed to parse expression: {0}")]
    Parse(#[from] ParseError),
    #[error("symbol '{0}' is not defined")]
    MissingSymbol(String),
    #[error("Function '{0}' not available!")]
    UnknownFunction(String),
    #[error("Procedure '{0}' not available!")]
    UnknownProcedure(String),
    #[error("{name}: {message}")]
    InvalidArguments { name: String, message: String },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("date arithmetic left the supported calendar range")]
    DateOutOfRange,
    #[error("expression nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),
    #[error("cell references require a sheet")]
    NoSheet,
    #[error(transparent)]
    Address(#[from] A1ParseError),
}

impl EvalError {
    /// Argument validation failure reported by the function or procedure called `name`.
    pub fn invalid_args(name: &str, message: impl Into<String>) -> Self {
        EvalError::InvalidArguments {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
