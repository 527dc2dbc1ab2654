//! Tuned scan windows and vocabularies describing where things live on a
//! SMITCH sheet. These are domain assumptions about sheet layout, so they are
//! kept as data that a caller can override per plant.
use crate::error::ResultMessage;
use crate::error::SmitchError;
use crate::spreadsheet::ScanWindow;
use std::ops::RangeInclusive;

/// Category letters and the category each one stands for.
pub const CATEGORY_LETTERS: [(&str, &str); 6] = [
    ("S", "Sales Price"),
    ("M", "Material"),
    ("I", "Investment"),
    ("T", "Tooling"),
    ("C", "Cycle Times"),
    ("H", "Headcount"),
];

/// Manufacturing sites recognised anywhere on a sheet.
pub const KNOWN_PLANTS: [&str; 8] = [
    "Valley City",
    "Wellington",
    "Liverpool",
    "Jefferson",
    "Saltillo",
    "Chatham",
    "Auburn Hills",
    "Moscow",
];

/// Header phrases that mark the end of the metric columns.
pub const STOP_KEYWORDS: [&str; 2] = ["demonstrated rate at 100%", "demon-strated rate"];

/// Criteria for locating regions on a sheet.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Rows and columns searched for the metric header row (default C1:S5).
    pub header_window: ScanWindow,

    /// Columns used when no header row has any text (default C..G).
    pub fallback_columns: RangeInclusive<usize>,

    /// Stop phrases, matched against whitespace-normalized, lower-cased headers.
    pub stop_keywords: Vec<String>,

    /// Header rows searched for a date in each metric column (default 5).
    pub date_header_rows: usize,

    /// Region searched for category letters (default A1:C49).
    pub category_window: ScanWindow,

    /// Category letter to category name.
    pub categories: Vec<(String, String)>,

    /// Length of the last category band, which has no successor (default 25).
    pub last_band_rows: usize,

    /// Rows sampled when ranking subcategory columns by text density (default 29).
    pub subcategory_rows: usize,

    /// Column used for subcategories when nothing better is known (default 3).
    pub default_subcategory_column: usize,

    /// Known plant names.
    pub plants: Vec<String>,

    /// Region searched for the weekly APW marker (default A1:AD20).
    pub apw_window: ScanWindow,

    /// Columns to the right of the APW marker probed for its value (default 9).
    pub apw_lookahead: usize,

    /// Region searched for the OH anchor (default A:AW, all rows).
    pub ebit_anchor_window: ScanWindow,

    /// Columns to the right of the OH anchor probed for values (default 14).
    pub ebit_value_columns: usize,

    /// Rows searched upward for an EBIT metric header (default 29).
    pub ebit_header_lookback: usize,

    /// Optional cap on the number of rows walked from the OH anchor. None walks
    /// to the end of the sheet.
    pub ebit_row_cap: Option<usize>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            header_window: ScanWindow::bounded((1, 5), (3, 19)),
            fallback_columns: 3..=7,
            stop_keywords: STOP_KEYWORDS.iter().map(|keyword| keyword.to_string()).collect(),
            date_header_rows: 5,
            category_window: ScanWindow::bounded((1, 49), (1, 3)),
            categories: CATEGORY_LETTERS
                .iter()
                .map(|(letter, name)| (letter.to_string(), name.to_string()))
                .collect(),
            last_band_rows: 25,
            subcategory_rows: 29,
            default_subcategory_column: 3,
            plants: KNOWN_PLANTS.iter().map(|plant| plant.to_string()).collect(),
            apw_window: ScanWindow::bounded((1, 20), (1, 30)),
            apw_lookahead: 9,
            ebit_anchor_window: ScanWindow {
                row_lower_bound: None,
                row_upper_bound: None,
                col_lower_bound: Some(1),
                col_upper_bound: Some(49),
            },
            ebit_value_columns: 14,
            ebit_header_lookback: 29,
            ebit_row_cap: None,
        }
    }
}

impl Layout {
    pub fn with_header_window(self, range: &str) -> Result<Self, SmitchError> {
        let header_window = ScanWindow::try_from(range).with_prefix("header_window")?;
        Ok(Self { header_window, ..self })
    }

    pub fn with_category_window(self, range: &str) -> Result<Self, SmitchError> {
        let category_window = ScanWindow::try_from(range).with_prefix("category_window")?;
        Ok(Self { category_window, ..self })
    }

    pub fn with_apw_window(self, range: &str) -> Result<Self, SmitchError> {
        let apw_window = ScanWindow::try_from(range).with_prefix("apw_window")?;
        Ok(Self { apw_window, ..self })
    }

    pub fn with_ebit_anchor_window(self, range: &str) -> Result<Self, SmitchError> {
        let ebit_anchor_window = ScanWindow::try_from(range).with_prefix("ebit_anchor_window")?;
        Ok(Self { ebit_anchor_window, ..self })
    }

    /// Looks up the category name of a letter.
    pub(crate) fn category_name(&self, letter: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(candidate, _)| candidate == letter)
            .map(|(_, name)| name.as_str())
    }
}
