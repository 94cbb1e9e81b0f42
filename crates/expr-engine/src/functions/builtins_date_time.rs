use crate::date::{self, DateField};
use crate::error::{EvalError, EvalResult};
use crate::eval::Expr;
use crate::functions::{FunctionContext, FunctionSpec};
use crate::value::Value;

macro_rules! date_field_fn {
    ($($name:literal, $fn_name:ident, $field:expr, $help:literal;)+) => {
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
                let value = ctx.eval_scalar(&args[0])?;
                Ok(Value::Number(date::date_field(&value, $field)))
            }
        )+
    };
}

date_field_fn! {
    "year", year_fn, DateField::Year, "year(date): the year of 'date'";
    "month", month_fn, DateField::Month, "month(date): the month of 'date' (1-12)";
    "day", day_fn, DateField::Day, "day(date): the day of month of 'date'";
    "hour", hour_fn, DateField::Hour, "hour(date): the hour of 'date' (0-23)";
    "minute", minute_fn, DateField::Minute, "minute(date): the minute of 'date'";
    "second", second_fn, DateField::Second, "second(date): the second of 'date'";
    "weekday", weekday_fn, DateField::Weekday, "weekday(date): day of week, 1 = Sunday .. 7 = Saturday";
    "weeknum", weeknum_fn, DateField::WeekOfYear, "weeknum(date): week of the year, weeks start on Sunday";
}

inventory::submit! {
    FunctionSpec {
        name: "now",
        min_args: 0,
        max_args: 0,
        help: "now(): the current date and time",
        implementation: now_fn,
    }
}

fn now_fn(ctx: &dyn FunctionContext, _args: &[Expr]) -> EvalResult<Value> {
    Ok(Value::Date(ctx.now()))
}

inventory::submit! {
    FunctionSpec {
        name: "today",
        min_args: 0,
        max_args: 0,
        help: "today(): the current date at midnight",
        implementation: today_fn,
    }
}

fn today_fn(ctx: &dyn FunctionContext, _args: &[Expr]) -> EvalResult<Value> {
    let midnight = ctx
        .now()
        .date()
        .and_hms_opt(0, 0, 0)
        .ok_or(EvalError::DateOutOfRange)?;
    Ok(Value::Date(midnight))
}

inventory::submit! {
    FunctionSpec {
        name: "isbusinessday",
        min_args: 1,
        max_args: 1,
        help: "isbusinessday(date): true if 'date' is a business day under the configured policy",
        implementation: isbusinessday_fn,
    }
}

fn isbusinessday_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let value = ctx.eval_scalar(&args[0])?;
    Ok(Value::Bool(date::is_business_day(&value, ctx.business_days())))
}
