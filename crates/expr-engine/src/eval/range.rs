//! Resolution of cell ranges against a [`SheetSource`].

use expr_model::{CellAddr, CellRange, CellValue, SheetSource};

use crate::value::Value;

static EMPTY: CellValue = CellValue::Empty;

/// Every coordinate of `range` with its cell, in row-major order.
///
/// Cells the sheet does not hold are reported as [`CellValue::Empty`]; each coordinate is
/// yielded exactly once.
pub fn cells<'s>(
    range: CellRange,
    sheet: &'s dyn SheetSource,
) -> impl Iterator<Item = (CellAddr, &'s CellValue)> + 's {
    range
        .iter()
        .map(move |addr| (addr, sheet.cell(addr).unwrap_or(&EMPTY)))
}

/// The values of `range`; empty cells are `None`.
pub fn values<'s>(
    range: CellRange,
    sheet: &'s dyn SheetSource,
) -> impl Iterator<Item = Option<Value>> + 's {
    cells(range, sheet).map(|(_, cell)| Value::from_cell(cell))
}

/// The numeric cells of `range`. Blank, text, boolean and date cells are skipped.
pub fn numbers<'s>(range: CellRange, sheet: &'s dyn SheetSource) -> impl Iterator<Item = f64> + 's {
    cells(range, sheet).filter_map(|(_, cell)| cell.as_number())
}
