use expr_engine::{BusinessDaysPolicy, EvalError, Expr, TimeAmount, TimeUnit, Value};
use pretty_assertions::assert_eq;

use super::harness::{assert_nan, assert_number, call, date, datetime, n, t, TestEnv};

fn plus(start: Expr, factor: f64, amount: TimeAmount) -> Expr {
    Expr::shift_date(start, n(factor), amount)
}

#[test]
fn business_day_addition_skips_weekends() {
    let env = TestEnv::new();
    let bd = TimeAmount::business_days(1);
    // 2024-06-07 is a Friday.
    let fri = Expr::Date(date(2024, 6, 7));
    let sat = Expr::Date(date(2024, 6, 8));
    let mon = Expr::Date(date(2024, 6, 10));

    assert_eq!(env.eval(&plus(fri.clone(), 0.0, bd)), Value::Date(date(2024, 6, 7)));
    assert_eq!(env.eval(&plus(fri, 1.0, bd)), Value::Date(date(2024, 6, 10)));
    assert_eq!(env.eval(&plus(sat.clone(), 1.0, bd)), Value::Date(date(2024, 6, 10)));
    assert_eq!(env.eval(&plus(sat, 2.0, bd)), Value::Date(date(2024, 6, 11)));
    assert_eq!(env.eval(&plus(mon, -1.0, bd)), Value::Date(date(2024, 6, 7)));
}

#[test]
fn business_days_follow_the_configured_policy() {
    let mut env = TestEnv::new();
    env.set_policy(BusinessDaysPolicy::SundayToThursday);
    // Thursday 2024-06-06 + 1 business day is Sunday 2024-06-09.
    let e = plus(Expr::Date(date(2024, 6, 6)), 1.0, TimeAmount::business_days(1));
    assert_eq!(env.eval(&e), Value::Date(date(2024, 6, 9)));

    let fri = call("isbusinessday", vec![t("2024-06-07")]);
    assert_eq!(env.eval(&fri), Value::Bool(false));
}

#[test]
fn calendar_units() {
    let env = TestEnv::new();
    let start = Expr::Date(datetime(2024, 1, 31, 12, 0, 0));
    let month = TimeAmount::new(TimeUnit::Month, 1);
    assert_eq!(
        env.eval(&plus(start.clone(), 1.0, month)),
        Value::Date(datetime(2024, 2, 29, 12, 0, 0))
    );
    let hours = TimeAmount::new(TimeUnit::Hour, 6);
    assert_eq!(
        env.eval(&plus(start, 2.0, hours)),
        Value::Date(datetime(2024, 2, 1, 0, 0, 0))
    );
}

#[test]
fn shifting_text_dates_parses_them() {
    let env = TestEnv::new();
    let e = plus(t("2024-06-07 08:00:00"), 1.0, TimeAmount::new(TimeUnit::Day, 1));
    assert_eq!(env.eval(&e), Value::Date(datetime(2024, 6, 8, 8, 0, 0)));

    let err = env.eval_err(&plus(n(3.0), 1.0, TimeAmount::new(TimeUnit::Day, 1)));
    assert_eq!(
        err,
        EvalError::TypeMismatch {
            expected: "date",
            found: "number",
        }
    );
}

#[test]
fn date_fields() {
    let env = TestEnv::new();
    let d = || t("2024-06-08 13:45:30");
    assert_number(&env.eval(&call("year", vec![d()])), 2024.0);
    assert_number(&env.eval(&call("month", vec![d()])), 6.0);
    assert_number(&env.eval(&call("day", vec![d()])), 8.0);
    assert_number(&env.eval(&call("hour", vec![d()])), 13.0);
    assert_number(&env.eval(&call("minute", vec![d()])), 45.0);
    assert_number(&env.eval(&call("second", vec![d()])), 30.0);
    assert_number(&env.eval(&call("weekday", vec![d()])), 7.0);
    assert_nan(&env.eval(&call("year", vec![t("soon")])));
}

#[test]
fn now_and_today_use_the_pinned_clock() {
    let env = TestEnv::new();
    assert_eq!(env.eval(&call("now", vec![])), Value::Date(env.clock));
    assert_eq!(env.eval(&call("today", vec![])), Value::Date(date(2024, 6, 7)));
}
