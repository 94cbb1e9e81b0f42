use std::collections::HashMap;

use crate::coercion::to_date;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Variable bindings visible to one evaluation.
///
/// Names are case-sensitive. A table is never modified while an evaluation borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: HashMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.symbols.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Like [`SymbolTable::get`], but a missing binding is an error.
    pub fn require(&self, name: &str) -> EvalResult<&Value> {
        self.get(name)
            .ok_or_else(|| EvalError::MissingSymbol(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a table from `name=value` strings.
    ///
    /// The value is typed as a number, then a boolean (`true`/`false`), then a date (see
    /// [`to_date`]), and otherwise kept as text. Entries without `=` or with an empty name are
    /// skipped.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((name, raw)) = pair.split_once('=') else {
                log::warn!("skipping symbol without '=': {pair:?}");
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                log::warn!("skipping symbol with empty name: {pair:?}");
                continue;
            }
            table.insert(name, parse_symbol_value(raw));
        }
        table
    }

    /// Build a table from a flat JSON object.
    ///
    /// Numbers, booleans and strings become values; `null` fields are skipped. Arrays and
    /// nested objects are rejected.
    pub fn from_json(json: &serde_json::Value) -> EvalResult<Self> {
        let serde_json::Value::Object(fields) = json else {
            return Err(EvalError::invalid_args(
                "symbols",
                "expected a JSON object of fields",
            ));
        };

        let mut table = Self::new();
        for (name, field) in fields {
            let value = match field {
                serde_json::Value::Null => continue,
                serde_json::Value::Bool(b) => Value::Bool(*b),
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(n) => Value::Number(n),
                    None => {
                        return Err(EvalError::invalid_args(
                            "symbols",
                            format!("field '{name}' is not representable as a number"),
                        ))
                    }
                },
                serde_json::Value::String(s) => Value::Text(s.clone()),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(EvalError::invalid_args(
                        "symbols",
                        format!("field '{name}' is not a scalar"),
                    ))
                }
            };
            table.insert(name.clone(), value);
        }
        Ok(table)
    }
}

fn parse_symbol_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        return Value::Number(n);
    }
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    match to_date(trimmed) {
        Some(d) => Value::Date(d),
        None => Value::Text(raw.to_string()),
    }
}

impl<K, V> FromIterator<(K, V)> for SymbolTable
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

impl<K, V> Extend<(K, V)> for SymbolTable
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
