use regex::Regex;

use crate::error::{EvalError, EvalResult};
use crate::eval::Expr;
use crate::functions::text;
use crate::functions::{eval_count, eval_integer, eval_text, FunctionContext, FunctionSpec, VAR_ARGS};
use crate::value::Value;

/// Convert a 1-based position argument of `name` into a 0-based index.
fn position(ctx: &dyn FunctionContext, name: &str, expr: &Expr) -> EvalResult<usize> {
    let pos = eval_integer(ctx, name, expr)?;
    if pos < 1 {
        return Err(EvalError::invalid_args(
            name,
            format!("position must be at least 1, got {pos}"),
        ));
    }
    usize::try_from(pos - 1).map_err(|_| EvalError::invalid_args(name, "position out of range"))
}

inventory::submit! {
    FunctionSpec {
        name: "substr",
        min_args: 2,
        max_args: 3,
        help: "substr(str, start[, end]): characters from 1-based 'start' up to, excluding, 'end'",
        implementation: substr_fn,
    }
}

fn substr_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let start = position(ctx, "substr", &args[1])?;
    let end = match args.get(2) {
        Some(arg) => position(ctx, "substr", arg)?,
        None => text::len(&s),
    };
    Ok(Value::Text(text::substring(&s, start, end)))
}

inventory::submit! {
    FunctionSpec {
        name: "left",
        min_args: 2,
        max_args: 2,
        help: "left(str, n): the first 'n' characters of 'str'",
        implementation: left_fn,
    }
}

fn left_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let n = eval_count(ctx, "left", &args[1])?;
    Ok(Value::Text(text::left(&s, n)))
}

inventory::submit! {
    FunctionSpec {
        name: "mid",
        min_args: 3,
        max_args: 3,
        help: "mid(str, pos, n): 'n' characters of 'str' starting at 1-based 'pos'",
        implementation: mid_fn,
    }
}

fn mid_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let pos = position(ctx, "mid", &args[1])?;
    let n = eval_count(ctx, "mid", &args[2])?;
    Ok(Value::Text(text::mid(&s, pos, n)))
}

inventory::submit! {
    FunctionSpec {
        name: "right",
        min_args: 2,
        max_args: 2,
        help: "right(str, n): the last 'n' characters of 'str'",
        implementation: right_fn,
    }
}

fn right_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let n = eval_count(ctx, "right", &args[1])?;
    Ok(Value::Text(text::right(&s, n)))
}

inventory::submit! {
    FunctionSpec {
        name: "rept",
        min_args: 2,
        max_args: 2,
        help: "rept(str, n): 'str' repeated 'n' times",
        implementation: rept_fn,
    }
}

fn rept_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let n = eval_count(ctx, "rept", &args[1])?;
    text::repeat(&s, n).map(Value::Text).ok_or_else(|| {
        EvalError::invalid_args(
            "rept",
            format!("result exceeds {} bytes", text::MAX_TEXT_LEN),
        )
    })
}

inventory::submit! {
    FunctionSpec {
        name: "concatenate",
        min_args: 1,
        max_args: VAR_ARGS,
        help: "concatenate(s1, s2, ...): joins the textual form of all arguments",
        implementation: concatenate_fn,
    }
}

fn concatenate_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&eval_text(ctx, arg)?);
    }
    Ok(Value::Text(out))
}

inventory::submit! {
    FunctionSpec {
        name: "lower",
        min_args: 1,
        max_args: 1,
        help: "lower(str): 'str' in lower case",
        implementation: lower_fn,
    }
}

inventory::submit! {
    FunctionSpec {
        name: "lowercase",
        min_args: 1,
        max_args: 1,
        help: "lowercase(str): same as lower",
        implementation: lower_fn,
    }
}

fn lower_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    Ok(Value::Text(eval_text(ctx, &args[0])?.to_lowercase()))
}

inventory::submit! {
    FunctionSpec {
        name: "upper",
        min_args: 1,
        max_args: 1,
        help: "upper(str): 'str' in upper case",
        implementation: upper_fn,
    }
}

inventory::submit! {
    FunctionSpec {
        name: "uppercase",
        min_args: 1,
        max_args: 1,
        help: "uppercase(str): same as upper",
        implementation: upper_fn,
    }
}

fn upper_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    Ok(Value::Text(eval_text(ctx, &args[0])?.to_uppercase()))
}

inventory::submit! {
    FunctionSpec {
        name: "trim",
        min_args: 1,
        max_args: 1,
        help: "trim(str): 'str' without leading and trailing whitespace",
        implementation: trim_fn,
    }
}

fn trim_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    Ok(Value::Text(eval_text(ctx, &args[0])?.trim().to_string()))
}

inventory::submit! {
    FunctionSpec {
        name: "matches",
        min_args: 2,
        max_args: 2,
        help: "matches(str, regexp): true if the whole of 'str' matches the regular expression",
        implementation: matches_fn,
    }
}

fn matches_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let pattern = eval_text(ctx, &args[1])?;
    let re = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| EvalError::invalid_args("matches", format!("invalid pattern: {e}")))?;
    Ok(Value::Bool(re.is_match(&s)))
}

inventory::submit! {
    FunctionSpec {
        name: "len",
        min_args: 1,
        max_args: 1,
        help: "len(str): number of characters in 'str'",
        implementation: len_fn,
    }
}

inventory::submit! {
    FunctionSpec {
        name: "length",
        min_args: 1,
        max_args: 1,
        help: "length(str): same as len",
        implementation: len_fn,
    }
}

fn len_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    Ok(Value::Number(text::len(&s) as f64))
}

inventory::submit! {
    FunctionSpec {
        name: "find",
        min_args: 2,
        max_args: 3,
        help: "find(search, str[, start]): 1-based position of 'search' in 'str', 0 if absent",
        implementation: find_fn,
    }
}

fn find_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let needle = eval_text(ctx, &args[0])?;
    let haystack = eval_text(ctx, &args[1])?;
    let start = match args.get(2) {
        Some(arg) => position(ctx, "find", arg)? + 1,
        None => 1,
    };
    Ok(Value::Number(text::find(&needle, &haystack, start) as f64))
}

inventory::submit! {
    FunctionSpec {
        name: "replace",
        min_args: 4,
        max_args: 4,
        help: "replace(str, pos, len, newstr): replaces 'len' characters at 1-based 'pos' with 'newstr'",
        implementation: replace_fn,
    }
}

fn replace_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let pos = position(ctx, "replace", &args[1])?;
    let len = eval_count(ctx, "replace", &args[2])?;
    let new = eval_text(ctx, &args[3])?;
    text::replace(&s, pos, len, &new).map(Value::Text).ok_or_else(|| {
        EvalError::invalid_args(
            "replace",
            format!("{len} character(s) at position {} exceed the string", pos + 1),
        )
    })
}

inventory::submit! {
    FunctionSpec {
        name: "substitute",
        min_args: 3,
        max_args: 4,
        help: "substitute(str, find, replace[, occurrences]): replaces occurrences of 'find' (all if 'occurrences' <= 0)",
        implementation: substitute_fn,
    }
}

fn substitute_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let s = eval_text(ctx, &args[0])?;
    let find = eval_text(ctx, &args[1])?;
    let replacement = eval_text(ctx, &args[2])?;
    let max = match args.get(3) {
        Some(arg) => eval_integer(ctx, "substitute", arg)?,
        None => 0,
    };
    Ok(Value::Text(text::substitute(&s, &find, &replacement, max)))
}
