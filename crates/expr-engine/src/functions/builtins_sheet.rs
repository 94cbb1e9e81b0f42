use expr_model::{CellRange, SheetSource};
use statrs::statistics::Statistics;

use crate::coercion::to_number;
use crate::error::{EvalError, EvalResult};
use crate::eval::{range, Expr};
use crate::functions::math::criteria::Criteria;
use crate::functions::math::least_squares;
use crate::functions::{ArgValue, FunctionContext, FunctionSpec, VAR_ARGS};
use crate::value::Value;

/// Numeric inputs of a reducer: numeric cells of range arguments plus scalar arguments.
///
/// Scalars go through [`to_number`], so a non-numeric scalar contributes NaN.
fn collect_numbers(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Vec<f64>> {
    let mut out = Vec::new();
    for arg in args {
        match ctx.eval_arg(arg)? {
            ArgValue::Scalar(v) => out.push(to_number(&v)),
            ArgValue::Range(r) => {
                let sheet = ctx.sheet().ok_or(EvalError::NoSheet)?;
                out.extend(range::numbers(r, sheet));
            }
        }
    }
    Ok(out)
}

fn range_arg<'c>(
    ctx: &'c dyn FunctionContext,
    name: &str,
    expr: &Expr,
) -> EvalResult<(CellRange, &'c dyn SheetSource)> {
    match ctx.eval_arg(expr)? {
        ArgValue::Range(r) => Ok((r, ctx.sheet().ok_or(EvalError::NoSheet)?)),
        ArgValue::Scalar(v) => Err(EvalError::invalid_args(
            name,
            format!("expected a cell range, found {}", v.type_name()),
        )),
    }
}

macro_rules! reducer {
    ($($name:literal, $fn_name:ident, $help:literal, $reduce:expr;)+) => {
        $(
            inventory::submit! {
                FunctionSpec {
                    name: $name,
                    min_args: 1,
                    max_args: VAR_ARGS,
                    help: $help,
                    implementation: $fn_name,
                }
            }

            fn $fn_name(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
                let values = collect_numbers(ctx, args)?;
                let reduce: fn(&[f64]) -> f64 = $reduce;
                Ok(Value::Number(reduce(&values)))
            }
        )+
    };
}

reducer! {
    "sum", sum_fn, "sum(a, b, ...): sum of the numeric arguments and range cells", |v| v.iter().sum();
    "min", min_fn, "min(a, b, ...): smallest of the numeric arguments and range cells", |v| Statistics::min(v.iter());
    "max", max_fn, "max(a, b, ...): largest of the numeric arguments and range cells", |v| Statistics::max(v.iter());
    "average", average_fn, "average(a, b, ...): mean of the numeric arguments and range cells", |v| v.iter().mean();
    "stdev", stdev_fn, "stdev(a, b, ...): sample standard deviation", |v| v.iter().std_dev();
    "stdevp", stdevp_fn, "stdevp(a, b, ...): population standard deviation", |v| v.iter().population_std_dev();
}

inventory::submit! {
    FunctionSpec {
        name: "countif",
        min_args: 2,
        max_args: 2,
        help: "countif(range, criterion): number of cells matching 'criterion', e.g. 5, \">3\" or \"<>x\"",
        implementation: countif_fn,
    }
}

fn countif_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let (r, sheet) = range_arg(ctx, "countif", &args[0])?;
    let criteria = Criteria::parse(&ctx.eval_scalar(&args[1])?);
    let count = range::values(r, sheet)
        .filter(|v| criteria.matches(v.as_ref()))
        .count();
    Ok(Value::Number(count as f64))
}

inventory::submit! {
    FunctionSpec {
        name: "sumif",
        min_args: 2,
        max_args: 3,
        help: "sumif(range, criterion[, sum_range]): sum of the numeric cells whose criterion cell matches",
        implementation: sumif_fn,
    }
}

fn sumif_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let (r, sheet) = range_arg(ctx, "sumif", &args[0])?;
    let criteria = Criteria::parse(&ctx.eval_scalar(&args[1])?);
    let sum_range = match args.get(2) {
        Some(arg) => {
            let (s, _) = range_arg(ctx, "sumif", arg)?;
            if s.size() != r.size() {
                return Err(EvalError::invalid_args(
                    "sumif",
                    format!("criterion range {r} and sum range {s} differ in size"),
                ));
            }
            s
        }
        None => r,
    };

    let total = range::values(r, sheet)
        .zip(range::cells(sum_range, sheet))
        .filter(|(v, _)| criteria.matches(v.as_ref()))
        .filter_map(|(_, (_, cell))| cell.as_number())
        .sum::<f64>();
    Ok(Value::Number(total))
}

inventory::submit! {
    FunctionSpec {
        name: "countblank",
        min_args: 1,
        max_args: 1,
        help: "countblank(range): number of empty cells, cells holding empty text included",
        implementation: countblank_fn,
    }
}

fn countblank_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let (r, sheet) = range_arg(ctx, "countblank", &args[0])?;
    let count = range::cells(r, sheet)
        .filter(|(_, cell)| cell.is_blank())
        .count();
    Ok(Value::Number(count as f64))
}

/// Numeric cells of the `y` and `x` ranges, aligned by position.
fn regression_inputs(
    ctx: &dyn FunctionContext,
    name: &str,
    args: &[Expr],
) -> EvalResult<(Vec<f64>, Vec<f64>)> {
    let (ry, sheet) = range_arg(ctx, name, &args[0])?;
    let (rx, _) = range_arg(ctx, name, &args[1])?;
    let ys: Vec<f64> = range::numbers(ry, sheet).collect();
    let xs: Vec<f64> = range::numbers(rx, sheet).collect();
    if ys.len() != xs.len() {
        return Err(EvalError::invalid_args(
            name,
            format!(
                "{} numeric y value(s) but {} numeric x value(s)",
                ys.len(),
                xs.len()
            ),
        ));
    }
    Ok((ys, xs))
}

inventory::submit! {
    FunctionSpec {
        name: "slope",
        min_args: 2,
        max_args: 2,
        help: "slope(y_range, x_range): slope of the least-squares regression line",
        implementation: slope_fn,
    }
}

fn slope_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let (ys, xs) = regression_inputs(ctx, "slope", args)?;
    Ok(Value::Number(least_squares(&ys, &xs).0))
}

inventory::submit! {
    FunctionSpec {
        name: "intercept",
        min_args: 2,
        max_args: 2,
        help: "intercept(y_range, x_range): intercept of the least-squares regression line",
        implementation: intercept_fn,
    }
}

fn intercept_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let (ys, xs) = regression_inputs(ctx, "intercept", args)?;
    Ok(Value::Number(least_squares(&ys, &xs).1))
}
