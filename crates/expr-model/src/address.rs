use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest addressable row count (rows `1..=1_048_576`).
pub const MAX_ROWS: u32 = 1_048_576;

/// Largest addressable column count (columns `A..=XFD`).
pub const MAX_COLS: u32 = 16_384;

/// Zero-based cell coordinate; `CellAddr::new(0, 0)` is `A1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddr {
    pub row: u32,
    pub col: u32,
}

impl CellAddr {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn to_a1(self) -> String {
        let mut letters = String::new();
        let mut n = self.col + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, char::from(b'A' + (n % 26) as u8));
            n /= 26;
        }
        format!("{letters}{}", self.row + 1)
    }

    /// Parse `B7`, `$B$7` or `b7`.
    pub fn from_a1(a1: &str) -> Result<Self, A1ParseError> {
        let text = a1.trim();
        if text.is_empty() {
            return Err(A1ParseError::Empty);
        }
        let body = text.strip_prefix('$').unwrap_or(text);
        let split = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let (letters, rest) = body.split_at(split);
        if letters.is_empty() {
            return Err(A1ParseError::MissingColumn(text.to_string()));
        }
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(A1ParseError::MissingRow(text.to_string()));
        }
        if digits_end != rest.len() {
            return Err(A1ParseError::TrailingCharacters(text.to_string()));
        }

        let col = letters
            .bytes()
            .try_fold(0u32, |acc, b| {
                acc.checked_mul(26)?
                    .checked_add(u32::from(b.to_ascii_uppercase() - b'A') + 1)
            })
            .filter(|n| *n <= MAX_COLS)
            .ok_or_else(|| A1ParseError::ColumnOutOfRange(text.to_string()))?;
        let row = rest
            .parse::<u32>()
            .ok()
            .filter(|n| (1..=MAX_ROWS).contains(n))
            .ok_or_else(|| A1ParseError::RowOutOfRange(text.to_string()))?;
        Ok(Self::new(row - 1, col - 1))
    }
}

impl fmt::Display for CellAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Inclusive rectangle of cells; `start` is always the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellAddr,
    pub end: CellAddr,
}

impl CellRange {
    /// The rectangle spanned by two opposite corners, in either order.
    pub fn new(a: CellAddr, b: CellAddr) -> Self {
        Self {
            start: CellAddr::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddr::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse `A1:C4`; a lone address yields a one-cell range.
    pub fn from_a1(a1: &str) -> Result<Self, A1ParseError> {
        match a1.split_once(':') {
            Some((a, b)) => Ok(Self::new(CellAddr::from_a1(a)?, CellAddr::from_a1(b)?)),
            None => {
                let cell = CellAddr::from_a1(a1)?;
                Ok(Self::new(cell, cell))
            }
        }
    }

    pub fn size(&self) -> u64 {
        let rows = u64::from(self.end.row - self.start.row) + 1;
        let cols = u64::from(self.end.col - self.start.col) + 1;
        rows * cols
    }

    /// Every coordinate of the range, left to right then top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = CellAddr> {
        let (start, end) = (self.start, self.end);
        (start.row..=end.row)
            .flat_map(move |row| (start.col..=end.col).map(move |col| CellAddr::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum A1ParseError {
    #[error("cell reference is empty")]
    Empty,
    #[error("cell reference '{0}' has no column letters")]
    MissingColumn(String),
    #[error("cell reference '{0}' has no row number")]
    MissingRow(String),
    #[error("cell reference '{0}' names a column past XFD")]
    ColumnOutOfRange(String),
    #[error("cell reference '{0}' names a row outside 1..=1048576")]
    RowOutOfRange(String),
    #[error("unexpected characters after cell reference '{0}'")]
    TrailingCharacters(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_and_parses_column_letters() {
        for (col, name) in [(0, "A"), (25, "Z"), (26, "AA"), (701, "ZZ"), (702, "AAA")] {
            let addr = CellAddr::new(4, col);
            assert_eq!(addr.to_a1(), format!("{name}5"));
            assert_eq!(CellAddr::from_a1(&format!("{name}5")), Ok(addr));
        }
        assert_eq!(CellAddr::from_a1("$c$3"), Ok(CellAddr::new(2, 2)));
        assert_eq!(CellAddr::from_a1("XFD1048576"), Ok(CellAddr::new(MAX_ROWS - 1, MAX_COLS - 1)));
    }

    #[test]
    fn reports_what_is_wrong_with_a_reference() {
        assert_eq!(CellAddr::from_a1("  "), Err(A1ParseError::Empty));
        assert_eq!(CellAddr::from_a1("7"), Err(A1ParseError::MissingColumn("7".into())));
        assert_eq!(CellAddr::from_a1("Q"), Err(A1ParseError::MissingRow("Q".into())));
        assert_eq!(CellAddr::from_a1("B0"), Err(A1ParseError::RowOutOfRange("B0".into())));
        assert_eq!(
            CellAddr::from_a1("XFE2"),
            Err(A1ParseError::ColumnOutOfRange("XFE2".into()))
        );
        assert_eq!(
            CellAddr::from_a1("B2!"),
            Err(A1ParseError::TrailingCharacters("B2!".into()))
        );
    }

    #[test]
    fn ranges_span_either_corner_order() {
        let r = CellRange::from_a1("C2:A5").unwrap();
        assert_eq!(r, CellRange::from_a1("A2:C5").unwrap());
        assert_eq!(r.size(), 12);
        assert_eq!(r.to_string(), "A2:C5");
        assert_eq!(CellRange::from_a1("D9").unwrap().to_string(), "D9");
    }

    #[test]
    fn walks_rows_before_advancing() {
        let cells: Vec<String> = CellRange::from_a1("B1:C2")
            .unwrap()
            .iter()
            .map(CellAddr::to_a1)
            .collect();
        assert_eq!(cells, ["B1", "C1", "B2", "C2"]);
    }
}
