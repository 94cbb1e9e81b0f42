use crate::error::EvalResult;
use crate::eval::Expr;
use crate::functions::math::{rint, signum};
use crate::functions::{eval_number, FunctionContext, FunctionSpec};
use crate::value::Value;

// One-argument numeric functions. Non-numeric arguments evaluate to NaN.
macro_rules! unary_math {
    ($($name:literal, $fn_name:ident, $help:literal, $op:expr;)+) => {
        $(
            inventory::submit! {
                FunctionSpec {
                    name: $name,
                    min_args: 1,
                    max_args: 1,
                    help: $help,
                    implementation: $fn_name,
                }
            }

            fn $fn_name(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
                let x = eval_number(ctx, &args[0])?;
                let op: fn(f64) -> f64 = $op;
                Ok(Value::Number(op(x)))
            }
        )+
    };
}

unary_math! {
    "abs", abs_fn, "abs(x): absolute value of 'x'", f64::abs;
    "sqrt", sqrt_fn, "sqrt(x): square root of 'x'", f64::sqrt;
    "cbrt", cbrt_fn, "cbrt(x): cube root of 'x'", f64::cbrt;
    "log", log_fn, "log(x): natural logarithm of 'x'", f64::ln;
    "log10", log10_fn, "log10(x): base-10 logarithm of 'x'", f64::log10;
    "exp", exp_fn, "exp(x): e raised to the power of 'x'", f64::exp;
    "sin", sin_fn, "sin(x): sine of 'x' (radians)", f64::sin;
    "sinh", sinh_fn, "sinh(x): hyperbolic sine of 'x'", f64::sinh;
    "cos", cos_fn, "cos(x): cosine of 'x' (radians)", f64::cos;
    "cosh", cosh_fn, "cosh(x): hyperbolic cosine of 'x'", f64::cosh;
    "tan", tan_fn, "tan(x): tangent of 'x' (radians)", f64::tan;
    "tanh", tanh_fn, "tanh(x): hyperbolic tangent of 'x'", f64::tanh;
    "atan", atan_fn, "atan(x): arc tangent of 'x'", f64::atan;
    "signum", signum_fn, "signum(x): -1, 0 or 1 depending on the sign of 'x'", signum;
    "rint", rint_fn, "rint(x): 'x' rounded to the nearest integer, ties to even", rint;
    "floor", floor_fn, "floor(x): largest integer not greater than 'x'", f64::floor;
    "ceil", ceil_fn, "ceil(x): smallest integer not less than 'x'", f64::ceil;
}

inventory::submit! {
    FunctionSpec {
        name: "atan2",
        min_args: 2,
        max_args: 2,
        help: "atan2(y, x): angle of the point (x, y) in radians",
        implementation: atan2_fn,
    }
}

fn atan2_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let y = eval_number(ctx, &args[0])?;
    let x = eval_number(ctx, &args[1])?;
    Ok(Value::Number(y.atan2(x)))
}

inventory::submit! {
    FunctionSpec {
        name: "hypot",
        min_args: 2,
        max_args: 2,
        help: "hypot(x, y): sqrt(x^2 + y^2) without intermediate overflow",
        implementation: hypot_fn,
    }
}

fn hypot_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let x = eval_number(ctx, &args[0])?;
    let y = eval_number(ctx, &args[1])?;
    Ok(Value::Number(x.hypot(y)))
}

inventory::submit! {
    FunctionSpec {
        name: "pow",
        min_args: 2,
        max_args: 2,
        help: "pow(base, exp): 'base' raised to the power of 'exp'",
        implementation: pow_fn,
    }
}

inventory::submit! {
    FunctionSpec {
        name: "power",
        min_args: 2,
        max_args: 2,
        help: "power(base, exp): same as pow",
        implementation: pow_fn,
    }
}

fn pow_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let base = eval_number(ctx, &args[0])?;
    let exp = eval_number(ctx, &args[1])?;
    Ok(Value::Number(base.powf(exp)))
}
