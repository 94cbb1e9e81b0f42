use chrono::NaiveDateTime;
use expr_model::{CellAddr, CellRange};

use crate::date::TimeAmount;
use crate::error::EvalResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Ne,
}

impl CompareOp {
    /// Apply the operator to a [`compare`](crate::coercion::compare) result.
    ///
    /// An incomparable pair (`NaN`) satisfies only `Ne`.
    pub fn test(self, cmp: f64) -> bool {
        if cmp.is_nan() {
            return self == CompareOp::Ne;
        }
        match self {
            CompareOp::Lt => cmp < 0.0,
            CompareOp::Lte => cmp <= 0.0,
            CompareOp::Gt => cmp > 0.0,
            CompareOp::Gte => cmp >= 0.0,
            CompareOp::Eq => cmp == 0.0,
            CompareOp::Ne => cmp != 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDateTime),
    Variable(String),
    Constant(Constant),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Cell(CellAddr),
    Range(CellAddr, CellAddr),
    /// `date ± factor × amount`; subtraction is a negative factor.
    ShiftDate {
        date: Box<Expr>,
        factor: Box<Expr>,
        amount: TimeAmount,
    },
}

impl Expr {
    pub fn text(s: impl Into<String>) -> Self {
        Expr::Text(s.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// A cell reference such as `B3`, or a range reference such as `A1:C4`.
    pub fn reference(a1: &str) -> EvalResult<Self> {
        let range = CellRange::from_a1(a1)?;
        if a1.contains(':') {
            Ok(Expr::Range(range.start, range.end))
        } else {
            Ok(Expr::Cell(range.start))
        }
    }

    pub fn shift_date(date: Expr, factor: Expr, amount: TimeAmount) -> Self {
        Expr::ShiftDate {
            date: Box::new(date),
            factor: Box::new(factor),
            amount,
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Number(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Bool(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Text(value.to_string())
    }
}

/// One top-level statement of a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Expr),
    Procedure { name: String, args: Vec<Expr> },
}
