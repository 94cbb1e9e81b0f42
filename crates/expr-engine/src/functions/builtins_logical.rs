use crate::coercion::{to_boolean, to_number};
use crate::error::{EvalError, EvalResult};
use crate::eval::Expr;
use crate::functions::{FunctionContext, FunctionSpec};
use crate::value::Value;

inventory::submit! {
    FunctionSpec {
        name: "if",
        min_args: 3,
        max_args: 3,
        help: "if(cond, then, else): evaluates 'then' if 'cond' is true, otherwise 'else'",
        implementation: if_fn,
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ifelse",
        min_args: 3,
        max_args: 3,
        help: "ifelse(cond, then, else): same as if",
        implementation: if_fn,
    }
}

fn if_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    // Only the selected branch is evaluated.
    let cond = ctx.eval_scalar(&args[0])?;
    if to_boolean(&cond) {
        ctx.eval_scalar(&args[1])
    } else {
        ctx.eval_scalar(&args[2])
    }
}

inventory::submit! {
    FunctionSpec {
        name: "ifmissing",
        min_args: 2,
        max_args: 2,
        help: "ifmissing(variable, default): the variable's value, or 'default' if it is not defined",
        implementation: ifmissing_fn,
    }
}

fn ifmissing_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let Expr::Variable(name) = &args[0] else {
        return Err(EvalError::invalid_args(
            "ifmissing",
            "first argument must be a variable",
        ));
    };
    match ctx.symbol(name) {
        Some(value) => Ok(value.clone()),
        None => ctx.eval_scalar(&args[1]),
    }
}

inventory::submit! {
    FunctionSpec {
        name: "isnan",
        min_args: 1,
        max_args: 1,
        help: "isnan(x): true if 'x' is not a number",
        implementation: isnan_fn,
    }
}

fn isnan_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let value = ctx.eval_scalar(&args[0])?;
    Ok(Value::Bool(to_number(&value).is_nan()))
}
