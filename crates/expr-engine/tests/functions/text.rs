use expr_engine::{EvalError, Expr, Value};
use pretty_assertions::assert_eq;

use super::harness::{assert_number, assert_text, call, n, t, TestEnv};

#[test]
fn left_mid_right_never_fail_on_long_requests() {
    let env = TestEnv::new();
    assert_text(&env.eval(&call("left", vec![t("ab"), n(5.0)])), "ab");
    assert_text(&env.eval(&call("right", vec![t("abc"), n(2.0)])), "bc");
    assert_text(&env.eval(&call("mid", vec![t("abc"), n(5.0), n(2.0)])), "");
    assert_text(&env.eval(&call("mid", vec![t("abcdef"), n(2.0), n(3.0)])), "bcd");
}

#[test]
fn negative_counts_name_the_function() {
    let env = TestEnv::new();
    let err = env.eval_err(&call("left", vec![t("ab"), n(-1.0)]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "left"));

    let err = env.eval_err(&call("rept", vec![t("ab"), t("x")]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "rept"));
}

#[test]
fn rept_refuses_oversized_results() {
    let env = TestEnv::new();
    let err = env.eval_err(&call("rept", vec![t("ab"), n(4.0e18)]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "rept"));
    assert_text(&env.eval(&call("rept", vec![t("ab"), n(3.0)])), "ababab");
    assert_text(&env.eval(&call("rept", vec![t(""), n(4.0e18)])), "");
}

#[test]
fn substitute_respects_the_occurrence_limit() {
    let env = TestEnv::new();
    let sub = |max: f64| call("substitute", vec![t("aXbXc"), t("X"), t("-"), n(max)]);
    assert_text(&env.eval(&sub(-1.0)), "a-b-c");
    assert_text(&env.eval(&sub(1.0)), "a-bXc");
    assert_text(
        &env.eval(&call("substitute", vec![t("a.b.c"), t("."), t("")])),
        "abc",
    );
}

#[test]
fn replace_is_one_based_and_bounds_checked() {
    let env = TestEnv::new();
    assert_text(
        &env.eval(&call("replace", vec![t("hello"), n(2.0), n(3.0), t("ipp")])),
        "hippo",
    );
    let err = env.eval_err(&call("replace", vec![t("hello"), n(5.0), n(3.0), t("x")]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "replace"));
}

#[test]
fn substr_and_find() {
    let env = TestEnv::new();
    assert_text(&env.eval(&call("substr", vec![t("hello"), n(2.0)])), "ello");
    assert_text(&env.eval(&call("substr", vec![t("hello"), n(2.0), n(4.0)])), "el");
    assert_number(&env.eval(&call("find", vec![t("l"), t("hello")])), 3.0);
    assert_number(&env.eval(&call("find", vec![t("l"), t("hello"), n(5.0)])), 0.0);
}

#[test]
fn case_trim_length_and_concatenation() {
    let env = TestEnv::new();
    assert_text(&env.eval(&call("upper", vec![t("abc")])), "ABC");
    assert_text(&env.eval(&call("lowercase", vec![t("ABC")])), "abc");
    assert_text(&env.eval(&call("trim", vec![t("  x ")])), "x");
    assert_number(&env.eval(&call("length", vec![t("héllo")])), 5.0);
    assert_text(
        &env.eval(&call("concatenate", vec![t("a"), n(1.0), Expr::Bool(true)])),
        "a1true",
    );
}

#[test]
fn matches_whole_string() {
    let env = TestEnv::new();
    assert_eq!(
        env.eval(&call("matches", vec![t("abc123"), t("[a-z]+[0-9]+")])),
        Value::Bool(true)
    );
    assert_eq!(
        env.eval(&call("matches", vec![t("abc123x"), t("[a-z]+[0-9]+")])),
        Value::Bool(false)
    );
    let err = env.eval_err(&call("matches", vec![t("abc"), t("(")]));
    assert!(matches!(err, EvalError::InvalidArguments { ref name, .. } if name == "matches"));
}

