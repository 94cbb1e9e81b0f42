//! In-memory tabular data model consumed by `expr-engine`'s cell-range functions.
//!
//! - [`CellAddr`] / [`CellRange`]: 0-indexed coordinates with A1 parsing and formatting.
//! - [`CellValue`]: the content of one cell.
//! - [`SheetSource`]: read access to a sheet; [`MemorySheet`] is a sparse implementation.

mod address;
mod sheet;
mod value;

pub use address::{A1ParseError, CellAddr, CellRange, MAX_COLS, MAX_ROWS};
pub use sheet::{MemorySheet, SheetError, SheetSource};
pub use value::CellValue;
