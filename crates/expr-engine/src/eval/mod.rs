mod ast;
mod batch;
mod evaluator;
pub mod range;

use expr_model::SheetSource;
use thiserror::Error;

use crate::date::BusinessDaysPolicy;
use crate::error::EvalResult;
use crate::symbols::SymbolTable;
use crate::value::Value;

pub use ast::{BinaryOp, CompareOp, Constant, Expr, LogicalOp, Statement, UnaryOp};
pub use batch::evaluate_batch;
pub use evaluator::{EvalConfig, Evaluator, OutputSink, StdoutSink, DEFAULT_MAX_DEPTH};

/// Failure reported by an [`ExpressionParser`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at offset {offset})")]
pub struct ParseError {
    pub message: String,
    /// Byte offset into the source text.
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Turns expression text into an [`Expr`] tree.
///
/// Grammars live outside this crate; anything that can produce a tree plugs in here.
pub trait ExpressionParser {
    fn parse(&self, source: &str) -> Result<Expr, ParseError>;
}

/// Evaluate `expr` once with the given bindings, optional sheet and business-day policy.
pub fn evaluate(
    expr: &Expr,
    symbols: &SymbolTable,
    sheet: Option<&dyn SheetSource>,
    policy: BusinessDaysPolicy,
) -> EvalResult<Value> {
    let config = EvalConfig {
        business_days: policy,
        ..EvalConfig::default()
    };
    let mut evaluator = Evaluator::new(symbols).with_config(config);
    if let Some(sheet) = sheet {
        evaluator = evaluator.with_sheet(sheet);
    }
    evaluator.evaluate(expr)
}
