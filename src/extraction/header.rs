use crate::extraction::date::parse_date;
use crate::extraction::layout::Layout;
use crate::helpers::string::normalize_whitespace;
use crate::spreadsheet::reference::column_letter;
use crate::spreadsheet::CellGrid;
use chrono::NaiveDate;

/// A column carrying a numeric metric series.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricColumn {
    /// Column index (1-based)
    pub column: usize,
    /// Header text as written on the sheet, trimmed
    pub header: String,
    /// First date found in the column's header rows
    pub date: Option<NaiveDate>,
}

/// Header cell that ends the metric columns.
#[derive(Clone, Debug, PartialEq)]
pub struct StopMarker {
    pub row: usize,
    pub column: usize,
    pub text: String,
}

/// Outcome of the header row search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderDetection {
    /// Winning header row, None when the synthetic fallback columns are used
    pub header_row: Option<usize>,
    pub columns: Vec<MetricColumn>,
    pub stop: Option<StopMarker>,
}

impl HeaderDetection {
    /// True when no header row had any text and the fallback columns were used.
    pub fn is_fallback(&self) -> bool {
        self.header_row.is_none()
    }
}

/// Finds the metric columns and their header text.
///
/// Each row of the header window is a candidate. A row holding a stop phrase
/// wins immediately, truncated before the stop column. Otherwise the row with
/// the most header cells wins, the earliest one on ties. When no row yields a
/// header cell, the fallback columns are used; a stop marker is still reported.
pub fn detect_metric_columns(grid: &CellGrid, layout: &Layout) -> HeaderDetection {
    let mut best: Option<(usize, Vec<(usize, String)>)> = None;
    let mut stop = None;

    for row in layout.header_window.rows(grid) {
        let mut headers = Vec::new();
        for column in layout.header_window.columns(grid) {
            let Some(text) = grid.text(row, column) else {
                continue;
            };
            let normalized = normalize_whitespace(text);
            if layout
                .stop_keywords
                .iter()
                .any(|keyword| normalized.contains(keyword.as_str()))
            {
                stop = Some(StopMarker { row, column, text: text.to_owned() });
                break;
            }
            headers.push((column, text.to_owned()));
        }

        if stop.is_some() {
            best = Some((row, headers));
            break;
        }
        let count = best.as_ref().map_or(0, |(_, best)| best.len());
        if headers.len() > count {
            best = Some((row, headers));
        }
    }

    match best {
        Some((row, headers)) if !headers.is_empty() => HeaderDetection {
            header_row: Some(row),
            columns: headers
                .into_iter()
                .map(|(column, header)| MetricColumn {
                    column,
                    header,
                    date: header_date(grid, layout, column),
                })
                .collect(),
            stop,
        },
        _ => HeaderDetection {
            header_row: None,
            columns: layout
                .fallback_columns
                .clone()
                .map(|column| MetricColumn {
                    column,
                    header: format!("column_{}", column_letter(column)),
                    date: None,
                })
                .collect(),
            stop,
        },
    }
}

/// First date written in any header row of a column.
fn header_date(grid: &CellGrid, layout: &Layout, column: usize) -> Option<NaiveDate> {
    (1..=layout.date_header_rows.min(grid.max_row()))
        .filter_map(|row| grid.text(row, column))
        .find_map(parse_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widest_header_row_wins() {
        let mut grid = CellGrid::new();
        grid.set(1, 4, "Title").unwrap();
        grid.set(2, 4, "Quoted\nCost/pc").unwrap();
        grid.set(2, 5, "Actual").unwrap();
        grid.set(2, 6, "Plex Standard").unwrap();
        grid.set(2, 1, "outside window").unwrap();

        let detection = detect_metric_columns(&grid, &Layout::default());
        assert_eq!(detection.header_row, Some(2));
        assert_eq!(detection.stop, None);
        let columns: Vec<_> = detection.columns.iter().map(|c| (c.column, c.header.as_str())).collect();
        assert_eq!(columns, vec![(4, "Quoted\nCost/pc"), (5, "Actual"), (6, "Plex Standard")]);
    }

    #[test]
    fn earliest_row_wins_ties() {
        let mut grid = CellGrid::new();
        grid.set(2, 3, "Quoted").unwrap();
        grid.set(4, 3, "Actual").unwrap();

        let detection = detect_metric_columns(&grid, &Layout::default());
        assert_eq!(detection.header_row, Some(2));
    }

    #[test]
    fn stop_phrase_truncates_and_wins() {
        let mut grid = CellGrid::new();
        grid.set(1, 3, "A").unwrap();
        grid.set(1, 4, "B").unwrap();
        grid.set(1, 5, "C").unwrap();
        grid.set(1, 6, "D").unwrap();
        grid.set(3, 4, "Quoted").unwrap();
        grid.set(3, 5, "Demon-\nstrated Rate at 100%").unwrap();
        grid.set(3, 6, "Actual").unwrap();
        grid.set(4, 4, "x").unwrap();
        grid.set(4, 5, "y").unwrap();
        grid.set(4, 6, "z").unwrap();
        grid.set(4, 7, "w").unwrap();
        grid.set(4, 8, "v").unwrap();

        // "Demon- strated" is not a stop phrase; row 4 is the widest.
        let detection = detect_metric_columns(&grid, &Layout::default());
        assert_eq!(detection.header_row, Some(4));

        grid.set(3, 5, "Demonstrated\nRate at 100%").unwrap();
        let detection = detect_metric_columns(&grid, &Layout::default());
        assert_eq!(detection.header_row, Some(3));
        assert_eq!(detection.columns.len(), 1);
        assert_eq!(detection.columns[0].column, 4);
        let stop = detection.stop.unwrap();
        assert_eq!((stop.row, stop.column), (3, 5));
    }

    #[test]
    fn hyphenated_stop_phrase() {
        let mut grid = CellGrid::new();
        grid.set(2, 3, "Quoted").unwrap();
        grid.set(2, 4, "Demon-strated Rate").unwrap();
        let detection = detect_metric_columns(&grid, &Layout::default());
        assert_eq!(detection.columns.len(), 1);
        assert!(detection.stop.is_some());
    }

    #[test]
    fn stop_in_first_column_falls_back() {
        let mut grid = CellGrid::new();
        grid.set(2, 3, "Demonstrated Rate at 100%").unwrap();
        grid.set(6, 4, 12.5).unwrap();

        let detection = detect_metric_columns(&grid, &Layout::default());
        assert!(detection.is_fallback());
        let columns: Vec<_> = detection.columns.iter().map(|c| c.column).collect();
        assert_eq!(columns, vec![3, 4, 5, 6, 7]);
        let stop = detection.stop.unwrap();
        assert_eq!((stop.row, stop.column), (2, 3));
    }

    #[test]
    fn fallback_columns_without_headers() {
        let mut grid = CellGrid::new();
        grid.set(10, 10, 1.0).unwrap();

        let detection = detect_metric_columns(&grid, &Layout::default());
        assert!(detection.is_fallback());
        let headers: Vec<_> = detection.columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["column_C", "column_D", "column_E", "column_F", "column_G"]);
    }

    #[test]
    fn column_dates_come_from_any_header_row() {
        let mut grid = CellGrid::new();
        grid.set(1, 4, "Data as of 03/15/2024").unwrap();
        grid.set(2, 4, "Quoted").unwrap();
        grid.set(2, 5, "Actual").unwrap();

        let detection = detect_metric_columns(&grid, &Layout::default());
        assert_eq!(detection.header_row, Some(2));
        assert_eq!(detection.columns[0].date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(detection.columns[1].date, None);
    }
}
