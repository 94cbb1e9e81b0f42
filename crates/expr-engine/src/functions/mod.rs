use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use expr_model::{CellRange, SheetSource};

use crate::coercion::{to_integer, to_number, to_text, NOT_AN_INTEGER};
use crate::date::BusinessDaysPolicy;
use crate::error::{EvalError, EvalResult};
use crate::eval::Expr;
use crate::value::Value;

pub mod math;
pub mod text;

// Built-in functions registered with the inventory-backed registry live in dedicated modules.
mod builtins_date_time;
mod builtins_env;
mod builtins_logical;
mod builtins_math;
mod builtins_procedures;
mod builtins_sheet;
mod builtins_text;

/// Upper arity bound for variadic functions.
pub const VAR_ARGS: usize = 255;

/// An evaluated function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Scalar(Value),
    /// A cell or range reference, left unresolved so reducers can walk it.
    Range(CellRange),
}

/// What function and procedure implementations see of the running evaluation.
///
/// Arguments arrive unevaluated so implementations such as `if` and `ifmissing` can decide
/// which of them to evaluate.
pub trait FunctionContext {
    fn eval_arg(&self, expr: &Expr) -> EvalResult<ArgValue>;
    fn eval_scalar(&self, expr: &Expr) -> EvalResult<Value>;
    fn symbol(&self, name: &str) -> Option<&Value>;
    fn sheet(&self) -> Option<&dyn SheetSource>;
    fn business_days(&self) -> BusinessDaysPolicy;
    /// Current local time, pinned for the evaluator when a clock was supplied.
    fn now(&self) -> NaiveDateTime;
    /// Output channel of procedures such as `println`.
    fn write_line(&self, line: &str);
}

pub type FunctionImpl = fn(&dyn FunctionContext, &[Expr]) -> EvalResult<Value>;
pub type ProcedureImpl = fn(&dyn FunctionContext, &[Expr]) -> EvalResult<()>;

pub struct FunctionSpec {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    /// One-line usage shown in [`function_overview`].
    pub help: &'static str,
    pub implementation: FunctionImpl,
}

pub struct ProcedureSpec {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    pub help: &'static str,
    pub implementation: ProcedureImpl,
}

inventory::collect!(FunctionSpec);
inventory::collect!(ProcedureSpec);

/// Iterate all [`FunctionSpec`] registrations, duplicates included.
pub fn iter_function_specs() -> impl Iterator<Item = &'static FunctionSpec> {
    inventory::iter::<FunctionSpec>.into_iter()
}

/// Iterate all [`ProcedureSpec`] registrations, duplicates included.
pub fn iter_procedure_specs() -> impl Iterator<Item = &'static ProcedureSpec> {
    inventory::iter::<ProcedureSpec>.into_iter()
}

fn function_registry() -> &'static HashMap<String, &'static FunctionSpec> {
    static REGISTRY: OnceLock<HashMap<String, &'static FunctionSpec>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        for spec in iter_function_specs() {
            if let Some(prev) = map.insert(spec.name.to_ascii_lowercase(), spec) {
                log::error!(
                    "function '{}' registered more than once; '{}' is shadowed",
                    spec.name,
                    prev.name
                );
            }
        }
        log::debug!("indexed {} functions", map.len());
        map
    })
}

fn procedure_registry() -> &'static HashMap<String, &'static ProcedureSpec> {
    static REGISTRY: OnceLock<HashMap<String, &'static ProcedureSpec>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        for spec in iter_procedure_specs() {
            if let Some(prev) = map.insert(spec.name.to_ascii_lowercase(), spec) {
                log::error!(
                    "procedure '{}' registered more than once; '{}' is shadowed",
                    spec.name,
                    prev.name
                );
            }
        }
        log::debug!("indexed {} procedures", map.len());
        map
    })
}

pub fn lookup_function(name: &str) -> Option<&'static FunctionSpec> {
    function_registry()
        .get(&name.to_ascii_lowercase())
        .copied()
}

pub fn lookup_procedure(name: &str) -> Option<&'static ProcedureSpec> {
    procedure_registry()
        .get(&name.to_ascii_lowercase())
        .copied()
}

pub fn call_function(ctx: &dyn FunctionContext, name: &str, args: &[Expr]) -> EvalResult<Value> {
    let spec = lookup_function(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
    check_arity(spec.name, spec.min_args, spec.max_args, args.len())?;
    log::trace!("calling function {}({} args)", spec.name, args.len());
    (spec.implementation)(ctx, args)
}

pub fn call_procedure(ctx: &dyn FunctionContext, name: &str, args: &[Expr]) -> EvalResult<()> {
    let spec =
        lookup_procedure(name).ok_or_else(|| EvalError::UnknownProcedure(name.to_string()))?;
    check_arity(spec.name, spec.min_args, spec.max_args, args.len())?;
    log::trace!("calling procedure {}({} args)", spec.name, args.len());
    (spec.implementation)(ctx, args)
}

fn check_arity(name: &str, min: usize, max: usize, got: usize) -> EvalResult<()> {
    if got >= min && got <= max {
        return Ok(());
    }
    let expected = if min == max {
        format!("{min}")
    } else if max == VAR_ARGS {
        format!("at least {min}")
    } else {
        format!("{min} to {max}")
    };
    Err(EvalError::invalid_args(
        name,
        format!("expected {expected} argument(s), got {got}"),
    ))
}

/// All registered functions, sorted by name.
pub fn function_catalog() -> Vec<&'static FunctionSpec> {
    let mut specs: Vec<_> = function_registry().values().copied().collect();
    specs.sort_by_key(|s| s.name);
    specs
}

/// All registered procedures, sorted by name.
pub fn procedure_catalog() -> Vec<&'static ProcedureSpec> {
    let mut specs: Vec<_> = procedure_registry().values().copied().collect();
    specs.sort_by_key(|s| s.name);
    specs
}

/// One `- <help>` line per function, sorted by name.
pub fn function_overview() -> String {
    overview(function_catalog().into_iter().map(|s| s.help))
}

/// One `- <help>` line per procedure, sorted by name.
pub fn procedure_overview() -> String {
    overview(procedure_catalog().into_iter().map(|s| s.help))
}

fn overview<'a>(helps: impl Iterator<Item = &'a str>) -> String {
    helps
        .map(|help| format!("- {help}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn eval_number(ctx: &dyn FunctionContext, expr: &Expr) -> EvalResult<f64> {
    Ok(to_number(&ctx.eval_scalar(expr)?))
}

pub(crate) fn eval_text(ctx: &dyn FunctionContext, expr: &Expr) -> EvalResult<String> {
    Ok(to_text(&ctx.eval_scalar(expr)?))
}

/// Evaluate an integer argument of `name`; non-numeric input is an argument error.
pub(crate) fn eval_integer(ctx: &dyn FunctionContext, name: &str, expr: &Expr) -> EvalResult<i64> {
    let value = ctx.eval_scalar(expr)?;
    match to_integer(&value) {
        NOT_AN_INTEGER => Err(EvalError::invalid_args(
            name,
            format!("expected an integer, found {}", value.type_name()),
        )),
        n => Ok(n),
    }
}

/// Like [`eval_integer`] but rejects negative values.
pub(crate) fn eval_count(ctx: &dyn FunctionContext, name: &str, expr: &Expr) -> EvalResult<usize> {
    let n = eval_integer(ctx, name, expr)?;
    usize::try_from(n)
        .map_err(|_| EvalError::invalid_args(name, format!("expected a non-negative count, got {n}")))
}
