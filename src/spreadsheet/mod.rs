//! # Spreadsheet Grid Module
//!
//! A read-only view over one worksheet's cell values, addressed with 1-based
//! rows and columns. Loading a grid from a workbook file is left to the
//! caller; this module only provides the builder and the probes the
//! extraction heuristics rely on.
use crate::error::SmitchError;
use crate::spreadsheet::reference::reference_to_index;
use std::collections::HashMap;
use thiserror::Error;

pub mod cell;
pub mod range;
pub mod reference;

pub use cell::Cell;
pub use cell::CellValue;
pub use range::ScanWindow;

/// Errors raised while building a grid or coercing its values.
#[derive(Error, Debug)]
pub enum GridError {
    /// Row and column numbers start at 1
    #[error("Invalid cell position ({row}, {col}): rows and columns are 1-based")]
    InvalidPosition { row: usize, col: usize },

    #[error("Invalid cell reference '{0}'")]
    InvalidReference(String),

    #[error("Cell value '{0}' is not numeric")]
    NotNumeric(String),
}

static EMPTY: CellValue = CellValue::Empty;

/// Sparse grid of typed cell values.
///
/// Probing any position, including row or column 0 and anything beyond the
/// bounds, is a defined no-op that yields [`CellValue::Empty`].
#[derive(Clone, Debug, Default)]
pub struct CellGrid {
    /// All stored cells
    cells: Vec<Cell>,
    /// Index mapping from (row, col) to cell vector position
    indexes: HashMap<(usize, usize), usize>,
    /// Largest row ever set
    row_upper_bound: usize,
    /// Largest column ever set
    col_upper_bound: usize,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from row-major values; the first row is row 1.
    pub fn from_rows<R, C, V>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut grid = Self::new();
        for (row, values) in rows.into_iter().enumerate() {
            for (col, value) in values.into_iter().enumerate() {
                grid.store(row + 1, col + 1, value.into());
            }
        }
        grid
    }

    /// Sets the value at a 1-based position, replacing any previous value.
    ///
    /// Empty values are not stored but still widen the bounds, the same way a
    /// formatted blank cell counts towards a worksheet's dimension.
    pub fn set<V>(&mut self, row: usize, col: usize, value: V) -> Result<(), SmitchError>
    where
        V: Into<CellValue>,
    {
        if row == 0 || col == 0 {
            return Err(GridError::InvalidPosition { row, col }.into());
        }
        self.store(row, col, value.into());
        Ok(())
    }

    /// Sets the value at an Excel-style reference such as "D6".
    pub fn set_at<V>(&mut self, reference: &str, value: V) -> Result<(), SmitchError>
    where
        V: Into<CellValue>,
    {
        let (row, col) = reference_to_index(reference)
            .ok_or_else(|| GridError::InvalidReference(reference.to_owned()))?;
        self.set(row, col, value)
    }

    fn store(&mut self, row: usize, col: usize, value: CellValue) {
        self.row_upper_bound = self.row_upper_bound.max(row);
        self.col_upper_bound = self.col_upper_bound.max(col);
        if value == CellValue::Empty {
            if let Some(index) = self.indexes.get(&(row, col)) {
                self.cells[*index].value = CellValue::Empty;
            }
            return;
        }
        match self.indexes.get(&(row, col)) {
            Some(index) => self.cells[*index].value = value,
            None => {
                self.indexes.insert((row, col), self.cells.len());
                self.cells.push(Cell { row, col, value });
            }
        }
    }

    /// Largest row set so far.
    pub fn max_row(&self) -> usize {
        self.row_upper_bound
    }

    /// Largest column set so far.
    pub fn max_column(&self) -> usize {
        self.col_upper_bound
    }

    /// Returns true if no cell holds a value.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.value.is_empty())
    }

    /// Gets the value at the specified position, `Empty` when out of range.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.indexes
            .get(&(row, col))
            .and_then(|index| self.cells.get(*index))
            .map_or(&EMPTY, |cell| &cell.value)
    }

    /// Trimmed text at a position, None for blanks and non-text values.
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.get(row, col).as_text()
    }

    /// Numeric value at a position, without coercing text.
    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col).as_number()
    }

    /// Iterates over the stored cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
