use crate::error::SmitchError;
use crate::spreadsheet::reference::col_to_index;
use crate::spreadsheet::reference::row_to_index;
use crate::spreadsheet::CellGrid;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use thiserror::Error;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern")
});

/// Errors related to Excel-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),
}

/// An Excel-style rectangular scan window with optional boundaries.
///
/// Heuristic scans never address cells outside their window, and a missing
/// bound stands for the grid's own edge. All bounds are 1-based and inclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanWindow {
    /// Lower row bound, None for the first row
    pub row_lower_bound: Option<usize>,
    /// Upper row bound, None for the last row of the grid
    pub row_upper_bound: Option<usize>,
    /// Lower column bound, None for the first column
    pub col_lower_bound: Option<usize>,
    /// Upper column bound, None for the last column of the grid
    pub col_upper_bound: Option<usize>,
}

impl ScanWindow {
    /// Creates a window bounded on all four sides.
    pub const fn bounded(rows: (usize, usize), cols: (usize, usize)) -> Self {
        Self {
            row_lower_bound: Some(rows.0),
            row_upper_bound: Some(rows.1),
            col_lower_bound: Some(cols.0),
            col_upper_bound: Some(cols.1),
        }
    }

    /// Rows covered by this window, clamped to the grid.
    pub fn rows(&self, grid: &CellGrid) -> RangeInclusive<usize> {
        clamp(self.row_lower_bound, self.row_upper_bound, grid.max_row())
    }

    /// Columns covered by this window, clamped to the grid.
    pub fn columns(&self, grid: &CellGrid) -> RangeInclusive<usize> {
        clamp(self.col_lower_bound, self.col_upper_bound, grid.max_column())
    }
}

fn clamp(lower: Option<usize>, upper: Option<usize>, max: usize) -> RangeInclusive<usize> {
    let lower = lower.unwrap_or(1).max(1);
    let upper = upper.map_or(max, |upper| upper.min(max));
    lower..=upper
}

impl TryFrom<&str> for ScanWindow {
    type Error = SmitchError;

    /// Parses an Excel-style range string.
    ///
    /// - "C1:S5" - rows 1 to 5 of columns C to S
    /// - "A:AW" - all rows in columns A to AW
    /// - "1:29" - rows 1 to 29, all columns
    /// - "A1" or "A1:" - from A1 to the end of the grid
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim().to_ascii_uppercase();
        let captures = RANGE_PATTERN
            .captures(value.as_str())
            .ok_or(RangeError::FormatError(value.to_owned()))?;
        Ok(ScanWindow {
            col_lower_bound: captures
                .get(1)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_lower_bound: captures
                .get(2)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
            col_upper_bound: captures
                .get(4)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_upper_bound: captures
                .get(5)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
        })
    }
}
