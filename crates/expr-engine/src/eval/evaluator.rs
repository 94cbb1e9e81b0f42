use std::cell::Cell;
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use expr_model::{CellRange, SheetSource};
use serde::{Deserialize, Serialize};

use crate::coercion::{compare, to_boolean, to_date, to_number, to_text};
use crate::date::{self, BusinessDaysPolicy};
use crate::error::{EvalError, EvalResult};
use crate::eval::{BinaryOp, Expr, ExpressionParser, LogicalOp, Statement, UnaryOp};
use crate::functions::{call_function, call_procedure, ArgValue, FunctionContext};
use crate::symbols::SymbolTable;
use crate::value::Value;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Per-evaluator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Which weekdays `date ± n business days` and `isbusinessday` treat as working days.
    pub business_days: BusinessDaysPolicy,
    /// Maximum nesting of expression nodes before evaluation fails with
    /// [`EvalError::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            business_days: BusinessDaysPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Destination of procedure output.
pub trait OutputSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&self, line: &str) {
        println!("{line}");
    }
}

/// Collects lines in memory.
impl OutputSink for Mutex<Vec<String>> {
    fn write_line(&self, line: &str) {
        let mut lines = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.push(line.to_string());
    }
}

/// Evaluates expression trees against one symbol table and, optionally, one sheet.
///
/// An evaluator holds no state that outlives a call apart from its configuration; it can be
/// reused for any number of expressions.
pub struct Evaluator<'a> {
    symbols: &'a SymbolTable,
    sheet: Option<&'a dyn SheetSource>,
    config: EvalConfig,
    output: Arc<dyn OutputSink>,
    clock: Option<NaiveDateTime>,
    depth: Cell<usize>,
}

impl<'a> Evaluator<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            sheet: None,
            config: EvalConfig::default(),
            output: Arc::new(StdoutSink),
            clock: None,
            depth: Cell::new(0),
        }
    }

    pub fn with_sheet(mut self, sheet: &'a dyn SheetSource) -> Self {
        self.sheet = Some(sheet);
        self
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_output(mut self, output: Arc<dyn OutputSink>) -> Self {
        self.output = output;
        self
    }

    /// Pin `now()` and `today()` to `now`.
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn evaluate(&self, expr: &Expr) -> EvalResult<Value> {
        self.depth.set(0);
        self.eval_expr(expr)
    }

    /// Run `statements` in order; returns the value of the last expression statement.
    pub fn execute(&self, statements: &[Statement]) -> EvalResult<Option<Value>> {
        let mut last = None;
        for statement in statements {
            self.depth.set(0);
            match statement {
                Statement::Expr(expr) => last = Some(self.eval_expr(expr)?),
                Statement::Procedure { name, args } => call_procedure(self, name, args)?,
            }
        }
        Ok(last)
    }

    /// Parse `source` with `parser` and evaluate the result.
    pub fn evaluate_text(&self, parser: &dyn ExpressionParser, source: &str) -> EvalResult<Value> {
        let expr = parser.parse(source)?;
        self.evaluate(&expr)
    }

    fn eval_expr(&self, expr: &Expr) -> EvalResult<Value> {
        let depth = self.depth.get() + 1;
        if depth > self.config.max_depth {
            return Err(EvalError::DepthExceeded(self.config.max_depth));
        }
        self.depth.set(depth);
        let out = self.eval_node(expr);
        self.depth.set(depth - 1);
        out
    }

    fn eval_node(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Text(s) => Ok(Value::Text(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Date(d) => Ok(Value::Date(*d)),
            Expr::Variable(name) => self.symbols.require(name).cloned(),
            Expr::Constant(c) => Ok(Value::Number(c.value())),
            Expr::Unary { op, expr } => {
                let v = self.eval_expr(expr)?;
                Ok(match op {
                    UnaryOp::Negate => Value::Number(-to_number(&v)),
                    UnaryOp::Not => Value::Bool(!to_boolean(&v)),
                })
            }
            Expr::Binary { op, left, right } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                Ok(binary(*op, &l, &r))
            }
            Expr::Compare { op, left, right } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                Ok(Value::Bool(op.test(compare(&l, &r))))
            }
            Expr::Logical { op, left, right } => {
                let l = to_boolean(&self.eval_expr(left)?);
                let result = match (op, l) {
                    (LogicalOp::And, false) => false,
                    (LogicalOp::Or, true) => true,
                    _ => to_boolean(&self.eval_expr(right)?),
                };
                Ok(Value::Bool(result))
            }
            Expr::Call { name, args } => call_function(self, name, args),
            Expr::Cell(addr) => {
                let sheet = self.sheet.ok_or(EvalError::NoSheet)?;
                // Empty cells read as NaN, which every numeric and date accessor passes through.
                Ok(sheet
                    .cell(*addr)
                    .and_then(Value::from_cell)
                    .unwrap_or(Value::Number(f64::NAN)))
            }
            Expr::Range(_, _) => Err(EvalError::TypeMismatch {
                expected: "scalar",
                found: "range",
            }),
            Expr::ShiftDate {
                date: start,
                factor,
                amount,
            } => {
                let start = match self.eval_expr(start)? {
                    Value::Date(d) => d,
                    Value::Text(s) => to_date(&s).ok_or(EvalError::TypeMismatch {
                        expected: "date",
                        found: "text",
                    })?,
                    other => {
                        return Err(EvalError::TypeMismatch {
                            expected: "date",
                            found: other.type_name(),
                        })
                    }
                };
                let factor = to_number(&self.eval_expr(factor)?);
                date::shift(start, factor, amount, self.config.business_days).map(Value::Date)
            }
        }
    }
}

fn binary(op: BinaryOp, l: &Value, r: &Value) -> Value {
    if op == BinaryOp::Add && (l.is_text() || r.is_text()) {
        let mut s = to_text(l);
        s.push_str(&to_text(r));
        return Value::Text(s);
    }
    let (a, b) = (to_number(l), to_number(r));
    Value::Number(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Pow => a.powf(b),
        BinaryOp::Mod => a % b,
    })
}

impl FunctionContext for Evaluator<'_> {
    fn eval_arg(&self, expr: &Expr) -> EvalResult<ArgValue> {
        match expr {
            Expr::Range(a, b) => Ok(ArgValue::Range(CellRange::new(*a, *b))),
            Expr::Cell(addr) => Ok(ArgValue::Range(CellRange::new(*addr, *addr))),
            other => self.eval_expr(other).map(ArgValue::Scalar),
        }
    }

    fn eval_scalar(&self, expr: &Expr) -> EvalResult<Value> {
        self.eval_expr(expr)
    }

    fn symbol(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    fn sheet(&self) -> Option<&dyn SheetSource> {
        self.sheet
    }

    fn business_days(&self) -> BusinessDaysPolicy {
        self.config.business_days
    }

    fn now(&self) -> NaiveDateTime {
        self.clock
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    fn write_line(&self, line: &str) {
        self.output.write_line(line);
    }
}
