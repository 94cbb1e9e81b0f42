//! Calendar and business-day arithmetic for `date ± n unit` chains.

mod amount;
mod business_days;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike};

use crate::coercion::to_date;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;

pub use amount::{AmountNote, TimeAmount, TimeUnit};
pub use business_days::{BusinessDaysPolicy, UnknownPolicy};

/// Upper bound on the number of business days a single step may walk.
const MAX_BUSINESS_DAY_STEPS: i64 = 3_000_000;

/// Apply `factor × amount` to `date`.
///
/// Plain amounts add `round(factor × magnitude)` units through calendar arithmetic (month and
/// year steps clamp to the end of shorter months). Business-day amounts walk the calendar
/// day by day under `policy`, see [`add_business_days`].
pub fn shift(
    date: NaiveDateTime,
    factor: f64,
    amount: &TimeAmount,
    policy: BusinessDaysPolicy,
) -> EvalResult<NaiveDateTime> {
    let steps = scaled_steps(factor, amount.magnitude)?;
    match amount.note {
        AmountNote::None => add_calendar(date, amount.unit, steps),
        AmountNote::BusinessDays => add_business_days(date, steps, policy),
    }
}

fn scaled_steps(factor: f64, magnitude: i64) -> EvalResult<i64> {
    let scaled = (factor * magnitude as f64).round();
    if !scaled.is_finite() {
        return Err(EvalError::invalid_args(
            "date arithmetic",
            format!("amount {factor} x {magnitude} is not a finite number"),
        ));
    }
    if scaled.abs() >= i64::MAX as f64 {
        return Err(EvalError::DateOutOfRange);
    }
    Ok(scaled as i64)
}

fn add_calendar(date: NaiveDateTime, unit: TimeUnit, steps: i64) -> EvalResult<NaiveDateTime> {
    let out = match unit {
        TimeUnit::Year => steps.checked_mul(12).and_then(|m| add_months(date, m)),
        TimeUnit::Month => add_months(date, steps),
        TimeUnit::Week => Duration::try_weeks(steps).and_then(|d| date.checked_add_signed(d)),
        TimeUnit::Day => Duration::try_days(steps).and_then(|d| date.checked_add_signed(d)),
        TimeUnit::Hour => Duration::try_hours(steps).and_then(|d| date.checked_add_signed(d)),
        TimeUnit::Minute => Duration::try_minutes(steps).and_then(|d| date.checked_add_signed(d)),
        TimeUnit::Second => Duration::try_seconds(steps).and_then(|d| date.checked_add_signed(d)),
        TimeUnit::Millisecond => {
            Duration::try_milliseconds(steps).and_then(|d| date.checked_add_signed(d))
        }
    };
    out.ok_or(EvalError::DateOutOfRange)
}

fn add_months(date: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    }
}

/// Move `count` business days away from `start`.
///
/// The walk has three phases:
/// 1. if `start` is not a business day, snap to the nearest business day in the direction of
///    travel (forward for `count >= 0`); a snap consumes one step of the count;
/// 2. walk one day at a time, counting every business day that is left behind, until `count`
///    business days have been counted;
/// 3. snap again in the direction of travel, in case the walk ended on a non-business day.
///
/// `count == 0` only performs phase 1. The time of day is preserved.
pub fn add_business_days(
    start: NaiveDateTime,
    count: i64,
    policy: BusinessDaysPolicy,
) -> EvalResult<NaiveDateTime> {
    if count.abs() > MAX_BUSINESS_DAY_STEPS {
        return Err(EvalError::DateOutOfRange);
    }
    let inc: i64 = if count < 0 { -1 } else { 1 };

    let mut day = start;
    let mut snapped = false;
    while !policy.is_business_day(day.date()) {
        day = step_day(day, inc)?;
        snapped = true;
    }
    if count == 0 {
        return Ok(day);
    }

    let mut remaining = count;
    if snapped {
        remaining -= inc;
    }
    while remaining != 0 {
        if policy.is_business_day(day.date()) {
            remaining -= inc;
        }
        day = step_day(day, inc)?;
    }

    while !policy.is_business_day(day.date()) {
        day = step_day(day, inc)?;
    }
    Ok(day)
}

fn step_day(day: NaiveDateTime, inc: i64) -> EvalResult<NaiveDateTime> {
    Duration::try_days(inc)
        .and_then(|d| day.checked_add_signed(d))
        .ok_or(EvalError::DateOutOfRange)
}

/// Returns true if `value` is (or parses to) a business day under `policy`.
///
/// Text is parsed with [`to_date`]; unparsable text and non-date values are never business
/// days.
pub fn is_business_day(value: &Value, policy: BusinessDaysPolicy) -> bool {
    let date = match value {
        Value::Date(d) => Some(*d),
        Value::Text(s) => to_date(s),
        Value::Number(_) | Value::Bool(_) => None,
    };
    date.is_some_and(|d| policy.is_business_day(d.date()))
}

/// Calendar field extracted by [`date_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// 1 = Sunday .. 7 = Saturday.
    Weekday,
    /// Week of the year; the week containing January 1st is week 1 and weeks start on Sunday.
    WeekOfYear,
}

/// Extract `field` from a date value or a parsable date string; `NaN` otherwise.
pub fn date_field(value: &Value, field: DateField) -> f64 {
    let date = match value {
        Value::Date(d) => *d,
        Value::Text(s) => match to_date(s) {
            Some(d) => d,
            None => return f64::NAN,
        },
        Value::Number(_) | Value::Bool(_) => return f64::NAN,
    };
    let n = match field {
        DateField::Year => date.year() as i64,
        DateField::Month => i64::from(date.month()),
        DateField::Day => i64::from(date.day()),
        DateField::Hour => i64::from(date.hour()),
        DateField::Minute => i64::from(date.minute()),
        DateField::Second => i64::from(date.second()),
        DateField::Weekday => i64::from(date.weekday().number_from_sunday()),
        DateField::WeekOfYear => week_of_year(date.date()),
    };
    n as f64
}

fn week_of_year(date: NaiveDate) -> i64 {
    let jan1_offset = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|d| i64::from(d.weekday().num_days_from_sunday()))
        .unwrap_or(0);
    (i64::from(date.ordinal0()) + jan1_offset) / 7 + 1
}
