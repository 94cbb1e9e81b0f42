#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use expr_engine::{
    BusinessDaysPolicy, CellAddr, EvalConfig, EvalError, Evaluator, Expr, MemorySheet,
    Statement, SymbolTable, Value,
};

/// Symbols, a sheet and a pinned clock shared by one test.
pub struct TestEnv {
    pub symbols: SymbolTable,
    pub sheet: MemorySheet,
    pub config: EvalConfig,
    pub clock: NaiveDateTime,
    pub output: Arc<Mutex<Vec<String>>>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            sheet: MemorySheet::new(),
            config: EvalConfig::default(),
            clock: datetime(2024, 6, 7, 10, 15, 0),
            output: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_policy(&mut self, policy: BusinessDaysPolicy) {
        self.config.business_days = policy;
    }

    pub fn bind(&mut self, name: &str, value: impl Into<Value>) {
        self.symbols.insert(name, value);
    }

    /// Set a cell by A1 reference.
    pub fn set(&mut self, a1: &str, value: impl Into<expr_engine::CellValue>) {
        let addr = CellAddr::from_a1(a1).expect("cell address");
        self.sheet.set(addr, value).expect("set cell");
    }

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.symbols)
            .with_sheet(&self.sheet)
            .with_config(self.config)
            .with_output(self.output.clone())
            .with_clock(self.clock)
    }

    pub fn try_eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        self.evaluator().evaluate(expr)
    }

    pub fn eval(&self, expr: &Expr) -> Value {
        self.try_eval(expr).expect("evaluation succeeds")
    }

    pub fn eval_err(&self, expr: &Expr) -> EvalError {
        self.try_eval(expr).expect_err("evaluation fails")
    }

    pub fn execute(&self, statements: &[Statement]) -> Result<Option<Value>, EvalError> {
        self.evaluator().execute(statements)
    }

    pub fn output(&self) -> Vec<String> {
        self.output.lock().expect("output lock").clone()
    }
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, s)
        .expect("valid time")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    datetime(y, m, d, 0, 0, 0)
}

pub fn n(value: f64) -> Expr {
    Expr::Number(value)
}

pub fn t(value: &str) -> Expr {
    Expr::text(value)
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::call(name, args)
}

/// `A1:B2`-style range expression.
pub fn range(a1: &str) -> Expr {
    let (a, b) = a1.split_once(':').expect("range with ':'");
    Expr::Range(
        CellAddr::from_a1(a).expect("start cell"),
        CellAddr::from_a1(b).expect("end cell"),
    )
}

pub fn cell(a1: &str) -> Expr {
    Expr::Cell(CellAddr::from_a1(a1).expect("cell address"))
}

pub fn assert_number(value: &Value, expected: f64) {
    match value {
        Value::Number(n) => {
            assert!((*n - expected).abs() < 1e-9, "expected {expected}, got {n}");
        }
        other => panic!("expected number {expected}, got {other:?}"),
    }
}

pub fn assert_nan(value: &Value) {
    match value {
        Value::Number(n) => assert!(n.is_nan(), "expected NaN, got {n}"),
        other => panic!("expected NaN, got {other:?}"),
    }
}

pub fn assert_text(value: &Value, expected: &str) {
    match value {
        Value::Text(s) => assert_eq!(s, expected),
        other => panic!("expected text {expected:?}, got {other:?}"),
    }
}
