//! OH/LAB cost section ("EBIT metrics").
//!
//! The section starts at the first cell reading "OH..." and is walked downward
//! in that column. Each OH, LAB, OH total or LAB total row contributes the
//! numeric values found to its right, labelled by the nearest known metric
//! header above them. A LAB total row ends the section.
use crate::extraction::category::category_at;
use crate::extraction::category::Category;
use crate::extraction::diagnostics::Diagnostics;
use crate::extraction::diagnostics::LOG_TARGET;
use crate::extraction::layout::Layout;
use crate::extraction::record::Enrichment;
use crate::extraction::record::ExtractedRecord;
use crate::helpers::string::normalize_whitespace;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::CellGrid;

const UNKNOWN_CATEGORY: &str = "Unknown";

/// Header phrase to metric label.
const EBIT_METRICS: [(&str, &str); 4] = [
    ("quoted cost/pc", "Quoted_Cost"),
    ("actual oee cost/pc at plex cost/hr (quote)", "Actual_OEE"),
    ("plex standard cost/pc", "Plex_Cost"),
    ("actual oee cost/pc at plex cost/hr (plex)", "Plex_OEE"),
];

/// Kind of row inside the OH/LAB section.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionRow {
    Oh,
    Lab,
    OhTotal,
    LabTotal,
}

impl SectionRow {
    /// Classifies the anchor-column text of a row; None rows are skipped.
    pub fn classify(text: &str) -> Option<Self> {
        let text = text.trim().to_uppercase();
        if is_marker(&text, "OH") {
            Some(Self::Oh)
        } else if is_marker(&text, "LAB") {
            Some(Self::Lab)
        } else if text.contains("VAR OH TOTAL") || text.contains("OH TOTAL") {
            Some(Self::OhTotal)
        } else if text.contains("LABOR TOTAL") || text.contains("LAB TOTAL") {
            Some(Self::LabTotal)
        } else {
            None
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Oh => "OH",
            Self::Lab => "LAB",
            Self::OhTotal => "OH Total",
            Self::LabTotal => "LAB Total",
        }
    }
}

/// "OH" alone or followed by a currency sign ("OH $", "OH$/pc").
fn is_marker(text: &str, marker: &str) -> bool {
    text.strip_prefix(marker)
        .map_or(false, |rest| rest.is_empty() || rest.trim_start().starts_with('$'))
}

/// Extracts the OH/LAB section values.
pub fn extract_ebit_metrics<D: Diagnostics>(
    grid: &CellGrid,
    layout: &Layout,
    categories: &[Category],
    enrichment: &Enrichment,
    diagnostics: &D,
) -> Vec<ExtractedRecord> {
    let Some((start_row, anchor_column)) = find_anchor(grid, layout) else {
        log::debug!(target: LOG_TARGET, "No OH section anchor");
        return Vec::new();
    };
    log::debug!(
        target: LOG_TARGET,
        "OH section anchored at {}",
        index_to_reference(start_row, anchor_column)
    );

    let last_row = match layout.ebit_row_cap {
        Some(cap) => (start_row + cap.saturating_sub(1)).min(grid.max_row()),
        None => grid.max_row(),
    };
    let last_column = (anchor_column + layout.ebit_value_columns).min(grid.max_column());

    let mut records = Vec::new();
    let mut terminated = false;
    for row in start_row..=last_row {
        let Some(section) = grid.text(row, anchor_column).and_then(SectionRow::classify) else {
            continue;
        };
        let category = category_at(categories, row).map_or(UNKNOWN_CATEGORY, |category| category.name.as_str());

        let mut emitted: Vec<&str> = Vec::new();
        for column in anchor_column + 1..=last_column {
            let Ok(value) = grid.get(row, column).to_double() else {
                continue;
            };
            let Some(metric) = metric_above(grid, layout, row, column) else {
                continue;
            };
            if emitted.contains(&metric) {
                continue;
            }
            emitted.push(metric);
            records.push(enrichment.record(category, section.as_str(), metric, value, None));
        }

        if section == SectionRow::LabTotal {
            terminated = true;
            break;
        }
    }

    if !terminated {
        diagnostics.warn(&format!(
            "OH section at {} reached row {} without a LAB TOTAL row",
            index_to_reference(start_row, anchor_column),
            last_row
        ));
    }
    records
}

/// First cell, row by row, whose text starts with "OH".
fn find_anchor(grid: &CellGrid, layout: &Layout) -> Option<(usize, usize)> {
    for row in layout.ebit_anchor_window.rows(grid) {
        for column in layout.ebit_anchor_window.columns(grid) {
            let found = grid
                .text(row, column)
                .map_or(false, |text| text.to_uppercase().starts_with("OH"));
            if found {
                return Some((row, column));
            }
        }
    }
    None
}

/// Nearest known metric header above a value, within the lookback window.
fn metric_above(grid: &CellGrid, layout: &Layout, row: usize, column: usize) -> Option<&'static str> {
    (1..=layout.ebit_header_lookback)
        .map_while(|distance| row.checked_sub(distance).filter(|row| *row > 0))
        .filter_map(|row| grid.text(row, column))
        .find_map(|text| {
            let header = normalize_whitespace(text);
            EBIT_METRICS
                .iter()
                .find(|(phrase, _)| header.contains(phrase))
                .map(|(_, label)| *label)
        })
}
