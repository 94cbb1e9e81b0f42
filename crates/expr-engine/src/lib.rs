#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! Typed expression evaluation core.
//!
//! Callers hand the engine a parsed [`Expr`] tree (any grammar can produce one through the
//! [`ExpressionParser`] seam), a [`SymbolTable`] and optionally a sheet, and get back a single
//! [`Value`].
//!
//! - [`coercion`]: total conversions between value variants; failures are sentinel values.
//! - [`date`]: calendar arithmetic and business-day stepping under a [`BusinessDaysPolicy`].
//! - [`functions`]: compile-time registries of named functions and procedures, see
//!   [`functions::function_overview`] for the built-in catalog.
//! - [`eval`]: the [`Evaluator`] facade and the cell-range adapter.
//!
//! ## Business days
//!
//! `date ± n business days` first snaps a weekend start onto the next business day in the
//! direction of travel (the snap counts as one step), then walks one calendar day at a time.
//! Friday + 1 business day is Monday; Monday - 1 is Friday; Saturday + 1 is Monday.
//!
//! The crate only logs through the [`log`] facade; installing a logger is up to the host.

pub mod coercion;
pub mod date;
pub mod error;
pub mod eval;
pub mod functions;
pub mod symbols;
pub mod value;

pub use date::{AmountNote, BusinessDaysPolicy, TimeAmount, TimeUnit};
pub use error::{EvalError, EvalResult};
pub use eval::{
    evaluate, evaluate_batch, BinaryOp, CompareOp, Constant, EvalConfig, Evaluator, Expr,
    ExpressionParser, LogicalOp, OutputSink, ParseError, Statement, StdoutSink, UnaryOp,
};
pub use functions::{
    call_function, call_procedure, function_catalog, function_overview, procedure_catalog,
    procedure_overview, FunctionContext, FunctionSpec, ProcedureSpec,
};
pub use symbols::SymbolTable;
pub use value::Value;

pub use expr_model::{CellAddr, CellRange, CellValue, MemorySheet, SheetSource};
