use expr_engine::{BinaryOp, EvalError, Expr, Value};
use pretty_assertions::assert_eq;

use super::harness::{assert_nan, assert_number, call, cell, n, range, t, TestEnv};

/// A1:A5 = 1, 2, "x", <empty>, 4; B1:B5 = 10, 20, 30, 40, 50.
fn env() -> TestEnv {
    let mut env = TestEnv::new();
    env.set("A1", 1.0);
    env.set("A2", 2.0);
    env.set("A3", "x");
    env.set("A5", 4.0);
    for (i, v) in [10.0, 20.0, 30.0, 40.0, 50.0].into_iter().enumerate() {
        env.set(&format!("B{}", i + 1), v);
    }
    env
}

#[test]
fn numeric_reducers_skip_non_numeric_cells() {
    let env = env();
    assert_number(&env.eval(&call("sum", vec![range("A1:A5")])), 7.0);
    assert_number(&env.eval(&call("average", vec![range("A1:A5")])), 7.0 / 3.0);
    assert_number(&env.eval(&call("min", vec![range("A1:A5")])), 1.0);
    assert_number(&env.eval(&call("max", vec![range("A5:A1")])), 4.0);
    assert_number(&env.eval(&call("sum", vec![range("A1:A2"), n(10.0)])), 13.0);
}

#[test]
fn empty_inputs() {
    let env = env();
    assert_number(&env.eval(&call("sum", vec![range("C1:C3")])), 0.0);
    assert_nan(&env.eval(&call("average", vec![range("C1:C3")])));
    assert_nan(&env.eval(&call("max", vec![range("C1:C3")])));
    assert_nan(&env.eval(&call("stdev", vec![range("A1:A1")])));
}

#[test]
fn standard_deviations() {
    let mut env = TestEnv::new();
    for (i, v) in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().enumerate() {
        env.set(&format!("A{}", i + 1), v);
    }
    assert_number(&env.eval(&call("stdevp", vec![range("A1:A8")])), 2.0);
    assert_number(
        &env.eval(&call("stdev", vec![range("A1:A8")])),
        (32.0f64 / 7.0).sqrt(),
    );
}

#[test]
fn countif_criteria() {
    let env = env();
    assert_number(&env.eval(&call("countif", vec![range("A1:A5"), n(2.0)])), 1.0);
    assert_number(&env.eval(&call("countif", vec![range("A1:A5"), t(">1")])), 2.0);
    assert_number(&env.eval(&call("countif", vec![range("A1:A5"), t("x")])), 1.0);
    assert_number(&env.eval(&call("countif", vec![range("B1:B5"), t("<>30")])), 4.0);
}

#[test]
fn sumif_with_and_without_sum_range() {
    let env = env();
    assert_number(&env.eval(&call("sumif", vec![range("B1:B5"), t(">=30")])), 120.0);
    assert_number(
        &env.eval(&call("sumif", vec![range("A1:A5"), t(">1"), range("B1:B5")])),
        70.0,
    );
    let err = env.eval_err(&call("sumif", vec![range("A1:A5"), n(1.0), range("B1:B4")]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "sumif"));
}

#[test]
fn countblank_does_not_count_zero() {
    let mut env = env();
    env.set("C1", 0.0);
    env.set("C2", "");
    assert_number(&env.eval(&call("countblank", vec![range("C1:C3")])), 2.0);
    assert_number(&env.eval(&call("countblank", vec![range("A1:A5")])), 1.0);
}

#[test]
fn slope_and_intercept() {
    let mut env = TestEnv::new();
    for (i, (y, x)) in [(3.0, 1.0), (5.0, 2.0), (7.0, 3.0)].into_iter().enumerate() {
        env.set(&format!("A{}", i + 1), y);
        env.set(&format!("B{}", i + 1), x);
    }
    assert_number(&env.eval(&call("slope", vec![range("A1:A3"), range("B1:B3")])), 2.0);
    assert_number(&env.eval(&call("intercept", vec![range("A1:A3"), range("B1:B3")])), 1.0);

    env.set("A4", 9.0);
    let err = env.eval_err(&call("slope", vec![range("A1:A4"), range("B1:B4")]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "slope"));
}

#[test]
fn cell_references() {
    let env = env();
    assert_eq!(env.eval(&cell("A3")), Value::from("x"));
    assert_nan(&env.eval(&cell("A4")));
    assert_nan(&env.eval(&Expr::binary(BinaryOp::Add, cell("A4"), n(1.0))));
    assert_nan(&env.eval(&call("year", vec![cell("A4")])));
    assert_nan(&env.eval(&cell("Z99")));
    assert_number(&env.eval(&call("sum", vec![cell("A4")])), 0.0);
    let err = env.eval_err(&call("countif", vec![n(1.0), n(1.0)]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "countif"));
}
