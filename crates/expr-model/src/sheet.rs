use std::collections::BTreeMap;

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::{CellAddr, CellValue, MAX_COLS, MAX_ROWS};

/// Read access to a tabular data source.
///
/// Cells that were never set resolve to `None`.
pub trait SheetSource {
    fn cell(&self, addr: CellAddr) -> Option<&CellValue>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("cell coordinate out of range: row {row}, col {col}")]
    OutOfBounds { row: u32, col: u32 },
    #[error("expected a JSON array of rows")]
    NotRows,
    #[error("unsupported JSON cell at row {row}, col {col}: {kind}")]
    UnsupportedCell { row: u32, col: u32, kind: &'static str },
}

/// Sparse in-memory sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySheet {
    cells: BTreeMap<CellAddr, CellValue>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at `addr`; storing [`CellValue::Empty`] clears the cell.
    pub fn set(&mut self, addr: CellAddr, value: impl Into<CellValue>) -> Result<(), SheetError> {
        if addr.row >= MAX_ROWS || addr.col >= MAX_COLS {
            return Err(SheetError::OutOfBounds {
                row: addr.row,
                col: addr.col,
            });
        }
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&addr);
        } else {
            self.cells.insert(addr, value);
        }
        Ok(())
    }

    /// Build a sheet from row-major values starting at `A1`.
    pub fn from_rows<I, R, V>(rows: I) -> Result<Self, SheetError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut sheet = Self::new();
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                sheet.set(CellAddr::new(r as u32, c as u32), value)?;
            }
        }
        Ok(sheet)
    }

    /// Build a sheet from a JSON array of row arrays.
    ///
    /// `null` becomes an empty cell; numbers, booleans and strings map to the matching
    /// [`CellValue`]. Nested arrays/objects are rejected.
    pub fn from_json_rows(json: &JsonValue) -> Result<Self, SheetError> {
        let rows = json.as_array().ok_or(SheetError::NotRows)?;
        let mut sheet = Self::new();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_array().ok_or(SheetError::NotRows)?;
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u32);
                let value = match cell {
                    JsonValue::Null => CellValue::Empty,
                    JsonValue::Bool(b) => CellValue::Bool(*b),
                    JsonValue::Number(n) => match n.as_f64() {
                        Some(n) => CellValue::Number(n),
                        None => {
                            return Err(SheetError::UnsupportedCell {
                                row: r,
                                col: c,
                                kind: "number",
                            })
                        }
                    },
                    JsonValue::String(s) => CellValue::Text(s.clone()),
                    JsonValue::Array(_) => {
                        return Err(SheetError::UnsupportedCell {
                            row: r,
                            col: c,
                            kind: "array",
                        })
                    }
                    JsonValue::Object(_) => {
                        return Err(SheetError::UnsupportedCell {
                            row: r,
                            col: c,
                            kind: "object",
                        })
                    }
                };
                sheet.set(CellAddr::new(r, c), value)?;
            }
        }
        Ok(sheet)
    }
}

impl SheetSource for MemorySheet {
    fn cell(&self, addr: CellAddr) -> Option<&CellValue> {
        self.cells.get(&addr)
    }
}
