use expr_engine::{Constant, EvalError, Expr, Value};
use pretty_assertions::assert_eq;

use super::harness::{assert_nan, assert_number, call, n, t, TestEnv};

#[test]
fn unary_functions() {
    let env = TestEnv::new();
    assert_number(&env.eval(&call("abs", vec![n(-2.5)])), 2.5);
    assert_number(&env.eval(&call("sqrt", vec![n(16.0)])), 4.0);
    assert_number(&env.eval(&call("cbrt", vec![n(27.0)])), 3.0);
    assert_number(&env.eval(&call("log10", vec![n(1000.0)])), 3.0);
    assert_number(&env.eval(&call("log", vec![Expr::Constant(Constant::E)])), 1.0);
    assert_number(&env.eval(&call("floor", vec![n(-1.5)])), -2.0);
    assert_number(&env.eval(&call("ceil", vec![n(1.2)])), 2.0);
    assert_number(&env.eval(&call("rint", vec![n(2.5)])), 2.0);
    assert_number(&env.eval(&call("signum", vec![n(-7.0)])), -1.0);
    assert_number(&env.eval(&call("signum", vec![n(0.0)])), 0.0);
}

#[test]
fn two_argument_functions() {
    let env = TestEnv::new();
    assert_number(&env.eval(&call("pow", vec![n(2.0), n(10.0)])), 1024.0);
    assert_number(&env.eval(&call("power", vec![n(9.0), n(0.5)])), 3.0);
    assert_number(&env.eval(&call("hypot", vec![n(3.0), n(4.0)])), 5.0);
    assert_number(
        &env.eval(&call("atan2", vec![n(1.0), n(1.0)])),
        std::f64::consts::FRAC_PI_4,
    );
}

#[test]
fn non_numeric_arguments_are_nan() {
    let env = TestEnv::new();
    assert_nan(&env.eval(&call("sqrt", vec![t("16")])));
    assert_eq!(
        env.eval(&call("isnan", vec![call("sqrt", vec![n(-1.0)])])),
        Value::Bool(true)
    );
    assert_eq!(env.eval(&call("isnan", vec![n(1.0)])), Value::Bool(false));
}

#[test]
fn scalar_min_max() {
    let env = TestEnv::new();
    assert_number(&env.eval(&call("min", vec![n(3.0), n(-1.0), n(2.0)])), -1.0);
    assert_number(&env.eval(&call("max", vec![n(3.0), n(-1.0), n(2.0)])), 3.0);
}

#[test]
fn names_are_case_insensitive() {
    let env = TestEnv::new();
    assert_number(&env.eval(&call("ABS", vec![n(-1.0)])), 1.0);
    assert_number(&env.eval(&call("Sqrt", vec![n(4.0)])), 2.0);
}

#[test]
fn if_evaluates_only_the_chosen_branch() {
    let env = TestEnv::new();
    let e = call("if", vec![Expr::Bool(true), n(1.0), Expr::var("undefined")]);
    assert_number(&env.eval(&e), 1.0);
    let e = call("ifelse", vec![Expr::Bool(false), Expr::var("undefined"), n(2.0)]);
    assert_number(&env.eval(&e), 2.0);
}

#[test]
fn ifmissing_supplies_defaults() {
    let mut env = TestEnv::new();
    let e = call("ifmissing", vec![Expr::var("x"), n(5.0)]);
    assert_number(&env.eval(&e), 5.0);
    env.bind("x", 1.0);
    assert_number(&env.eval(&e), 1.0);

    let err = env.eval_err(&call("ifmissing", vec![n(1.0), n(5.0)]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "ifmissing"));
}

#[test]
fn arity_is_checked() {
    let env = TestEnv::new();
    let err = env.eval_err(&call("abs", vec![n(1.0), n(2.0)]));
    assert_eq!(
        err,
        EvalError::InvalidArguments {
            name: "abs".to_string(),
            message: "expected 1 argument(s), got 2".to_string(),
        }
    );
}
