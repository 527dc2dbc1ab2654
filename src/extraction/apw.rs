use crate::extraction::diagnostics::LOG_TARGET;
use crate::extraction::layout::Layout;
use crate::extraction::record::Enrichment;
use crate::extraction::record::ExtractedRecord;
use crate::helpers::string::title_case;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::CellGrid;

const APW_MARKER: &str = "weekly apw";
const APW_CATEGORY: &str = "EBIT LOSS";
const APW_SUBCATEGORY: &str = "Weekly APW";
const DEFAULT_LABEL: &str = "Weekly APW Value";

/// Words that make a neighbouring cell a usable label for the APW value.
const LABEL_WORDS: [&str; 3] = ["quoted", "plex", "actual"];

/// Neighbours of the value cell probed for a label, in priority order:
/// two cells above, then left, then right.
const LABEL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (-2, 0), (0, -1), (0, 1)];

/// Extracts the weekly APW value.
///
/// Only the first marker cell in the APW window is considered. The value is
/// the first cell to its right that reads as a number; no value means no
/// record.
pub fn extract_weekly_apw(grid: &CellGrid, layout: &Layout, enrichment: &Enrichment) -> Vec<ExtractedRecord> {
    let Some((row, column)) = find_marker(grid, layout) else {
        log::debug!(target: LOG_TARGET, "No weekly APW marker");
        return Vec::new();
    };

    let value = (column + 1..=column + layout.apw_lookahead)
        .find_map(|col| grid.get(row, col).to_double().ok().map(|value| (col, value)));
    let Some((value_column, value)) = value else {
        log::debug!(
            target: LOG_TARGET,
            "Weekly APW marker at {} has no value",
            index_to_reference(row, column)
        );
        return Vec::new();
    };

    let metric = infer_label(grid, row, value_column).unwrap_or_else(|| DEFAULT_LABEL.to_owned());
    vec![enrichment.record(APW_CATEGORY, APW_SUBCATEGORY, &metric, value, None)]
}

fn find_marker(grid: &CellGrid, layout: &Layout) -> Option<(usize, usize)> {
    for row in layout.apw_window.rows(grid) {
        for column in layout.apw_window.columns(grid) {
            let found = grid
                .text(row, column)
                .map_or(false, |text| text.to_lowercase().contains(APW_MARKER));
            if found {
                return Some((row, column));
            }
        }
    }
    None
}

fn infer_label(grid: &CellGrid, row: usize, column: usize) -> Option<String> {
    LABEL_OFFSETS.iter().find_map(|(row_offset, col_offset)| {
        let row = row.checked_add_signed(*row_offset)?;
        let column = column.checked_add_signed(*col_offset)?;
        let text = grid.text(row, column)?;
        let lowered = text.to_lowercase();
        if text.chars().count() >= 3 && LABEL_WORDS.iter().any(|word| lowered.contains(word)) {
            Some(title_case(&text.replace(['\r', '\n'], " ")))
        } else {
            None
        }
    })
}
