use crate::coercion::compare;
use crate::eval::CompareOp;
use crate::value::Value;

/// A `countif`/`sumif` condition such as `5`, `">=10"`, `"<>apple"` or `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub op: CompareOp,
    pub rhs: Value,
}

impl Criteria {
    /// Numbers, booleans and dates match by equality; text may carry an operator prefix
    /// (`<> != <= >= < > =`) followed by a number, a boolean keyword or literal text.
    pub fn parse(input: &Value) -> Self {
        match input {
            Value::Text(s) => parse_criteria_string(s),
            other => Criteria {
                op: CompareOp::Eq,
                rhs: other.clone(),
            },
        }
    }

    /// Test one cell; blank cells never match.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match value {
            None => false,
            Some(value) => self.op.test(compare(value, &self.rhs)),
        }
    }
}

fn parse_criteria_string(raw: &str) -> Criteria {
    let (op, rhs_str) = split_op(raw.trim());
    let rhs_str = rhs_str.trim();

    let rhs = if let Ok(n) = rhs_str.parse::<f64>() {
        Value::Number(n)
    } else if rhs_str.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if rhs_str.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::Text(rhs_str.to_string())
    };
    Criteria { op, rhs }
}

fn split_op(raw: &str) -> (CompareOp, &str) {
    for (prefix, op) in [
        ("<>", CompareOp::Ne),
        ("!=", CompareOp::Ne),
        ("<=", CompareOp::Lte),
        (">=", CompareOp::Gte),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
        ("=", CompareOp::Eq),
    ] {
        if let Some(rest) = raw.strip_prefix(prefix) {
            return (op, rest);
        }
    }
    (CompareOp::Eq, raw)
}
