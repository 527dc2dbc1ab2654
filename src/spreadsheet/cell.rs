use crate::error::SmitchError;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::GridError;
use std::fmt::Display;

/// Typed value of a single spreadsheet cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    /// Numeric values, including dates already resolved to serial numbers
    Number(f64),
    /// Any textual content, verbatim
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    /// Returns the trimmed text of a non-blank text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.trim()).filter(|text| !text.is_empty()),
            _ => None,
        }
    }

    /// Returns the value of a numeric cell. Text is never coerced here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value).filter(|value| value.is_finite()),
            _ => None,
        }
    }

    /// Coerces the cell to a finite double.
    ///
    /// Text is accepted once currency symbols and thousands separators are
    /// stripped, so "$1,234.50" reads as 1234.5.
    pub fn to_double(&self) -> Result<f64, SmitchError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
                cleaned.trim().parse::<f64>()?
            }
            Self::Empty => Err(GridError::NotNumeric("<empty>".to_owned()))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(GridError::NotNumeric(self.to_string()).into())
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// A single stored cell with its 1-based position.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (1-based)
    pub row: usize,
    /// Column index (1-based)
    pub col: usize,
    pub value: CellValue,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "D6").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.reference(), self.value)
    }
}
