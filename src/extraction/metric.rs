use crate::extraction::category::category_bands;
use crate::extraction::category::Category;
use crate::extraction::header::MetricColumn;
use crate::extraction::layout::Layout;
use crate::extraction::record::Enrichment;
use crate::extraction::record::ExtractedRecord;
use crate::helpers::string::capitalize;
use crate::helpers::string::first_line;
use crate::spreadsheet::CellGrid;

/// Phrase to label, evaluated top to bottom; the first phrase contained in the
/// cleaned header wins.
const METRIC_LABELS: [(&str, &str); 7] = [
    ("quoted cost model", "Quoted"),
    ("quoted", "Quoted"),
    ("plex standard", "Plex"),
    ("actual", "Actual"),
    ("forecasted", "Forecasted"),
    ("demonstrated rate", "Demonstrated"),
    ("demon-strated", "Demonstrated"),
];

/// Rate and per-piece variants, tried when no plain label matched.
struct CompositeRule {
    phrase: &'static str,
    /// At least one of these must also appear; empty means no extra condition
    any_of: &'static [&'static str],
    label: &'static str,
}

const COMPOSITE_RULES: [CompositeRule; 6] = [
    CompositeRule { phrase: "quoted jph", any_of: &[], label: "Quoted_JPH" },
    CompositeRule { phrase: "quoted $", any_of: &[], label: "Quoted_$" },
    CompositeRule { phrase: "actual jph", any_of: &[], label: "Actual_JPH" },
    CompositeRule { phrase: "actual $", any_of: &[], label: "Actual_$" },
    CompositeRule { phrase: "plex std", any_of: &["jph"], label: "Plex_JPH" },
    CompositeRule { phrase: "plex std", any_of: &["$", "piece"], label: "Plex_$" },
];

impl CompositeRule {
    fn matches(&self, header: &str) -> bool {
        header.contains(self.phrase)
            && (self.any_of.is_empty() || self.any_of.iter().any(|extra| header.contains(extra)))
    }
}

/// Normalizes a metric column header into a metric label.
///
/// Returns None for contribution-margin columns ("CM%"), which never carry a
/// metric.
pub fn metric_name(header: &str, column: usize) -> Option<String> {
    let raw = first_line(header);
    let lowered = raw.to_lowercase();
    if lowered.contains("cm%") {
        return None;
    }
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || matches!(*c, ' ' | '$' | '/' | '→' | '-'))
        .collect();

    if let Some((_, label)) = METRIC_LABELS.iter().find(|(phrase, _)| cleaned.contains(phrase)) {
        return Some(label.to_string());
    }
    if let Some(rule) = COMPOSITE_RULES.iter().find(|rule| rule.matches(&cleaned)) {
        return Some(rule.label.to_owned());
    }
    match raw.split_whitespace().next() {
        Some(word) => Some(capitalize(word)),
        None => Some(format!("Col_{column}")),
    }
}

/// Reads every numeric cell at (subcategory row, metric column) inside the
/// category bands.
///
/// Rows with an empty subcategory cell are skipped, as are cells that are not
/// numbers. Each (row, column) pair yields at most one record.
pub fn extract_core_metrics(
    grid: &CellGrid,
    layout: &Layout,
    categories: &[Category],
    columns: &[MetricColumn],
    subcategory_column: usize,
    enrichment: &Enrichment,
) -> Vec<ExtractedRecord> {
    let metrics: Vec<(&MetricColumn, String)> = columns
        .iter()
        .filter_map(|column| Some((column, metric_name(&column.header, column.column)?)))
        .collect();

    let mut records = Vec::new();
    for (category, rows) in category_bands(grid, categories, layout) {
        for row in rows {
            let subcategory = grid.get(row, subcategory_column).to_string();
            let subcategory = subcategory.trim();
            if subcategory.is_empty() {
                continue;
            }
            for (column, metric) in &metrics {
                let Some(value) = grid.number(row, column.column) else {
                    continue;
                };
                records.push(enrichment.record(&category.name, subcategory, metric, value, column.date));
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::category::detect_categories;
    use crate::extraction::header::detect_metric_columns;
    use chrono::NaiveDate;

    #[test]
    fn plain_labels() {
        assert_eq!(metric_name("Quoted Cost Model", 4).as_deref(), Some("Quoted"));
        assert_eq!(metric_name("quoted", 4).as_deref(), Some("Quoted"));
        assert_eq!(metric_name("Plex Standard\nCost/pc", 5).as_deref(), Some("Plex"));
        assert_eq!(metric_name("ACTUAL 03/01/2024", 6).as_deref(), Some("Actual"));
        assert_eq!(metric_name("Forecasted", 7).as_deref(), Some("Forecasted"));
        assert_eq!(metric_name("Demonstrated Rate", 8).as_deref(), Some("Demonstrated"));
        assert_eq!(metric_name("Demon-strated", 8).as_deref(), Some("Demonstrated"));
    }

    #[test]
    fn only_first_line_counts() {
        assert_eq!(metric_name("Volume\nQuoted", 4).as_deref(), Some("Volume"));
    }

    #[test]
    fn contribution_margin_is_skipped() {
        assert_eq!(metric_name("CM% Quoted", 4), None);
        assert_eq!(metric_name("Actual cm%", 4), None);
    }

    #[test]
    fn composite_labels() {
        assert_eq!(metric_name("Plex Std JPH", 4).as_deref(), Some("Plex_JPH"));
        assert_eq!(metric_name("Plex Std $/piece", 4).as_deref(), Some("Plex_$"));
        assert_eq!(metric_name("Plex Std Piece", 4).as_deref(), Some("Plex_$"));
    }

    #[test]
    fn fallback_labels() {
        assert_eq!(metric_name("VOLUME per year", 4).as_deref(), Some("Volume"));
        assert_eq!(metric_name("2025", 4).as_deref(), Some("2025"));
        assert_eq!(metric_name("   ", 9).as_deref(), Some("Col_9"));
        assert_eq!(metric_name("column_C", 3).as_deref(), Some("Column_c"));
    }

    #[test]
    fn records_follow_category_bands() {
        let mut grid = CellGrid::new();
        grid.set(1, 4, "Quoted Cost/pc 03/01/2024").unwrap();
        grid.set(1, 5, "CM% Quoted").unwrap();
        grid.set(1, 6, "Actual").unwrap();
        grid.set(5, 1, "S").unwrap();
        grid.set(6, 3, "Tooling A").unwrap();
        grid.set(6, 4, 12.5).unwrap();
        grid.set(6, 5, 0.3).unwrap();
        grid.set(6, 6, "n/a").unwrap();
        grid.set(7, 4, 99.0).unwrap();
        grid.set(8, 1, "M").unwrap();
        grid.set(9, 3, "Steel").unwrap();
        grid.set(9, 6, 4).unwrap();

        let layout = Layout::default();
        let categories = detect_categories(&grid, &layout);
        let detection = detect_metric_columns(&grid, &layout);
        let enrichment = Enrichment { plant: None, part_name: Some("Rail".to_owned()) };
        let records = extract_core_metrics(&grid, &layout, &categories, &detection.columns, 3, &enrichment);

        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.category.as_str(), r.subcategory.as_str(), r.metric.as_str(), r.value))
            .collect();
        assert_eq!(
            summary,
            vec![("Sales Price", "Tooling A", "Quoted", 12.5), ("Material", "Steel", "Actual", 4.0)]
        );
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(records[1].date, None);
        assert!(records.iter().all(|r| r.part_name.as_deref() == Some("Rail")));
    }

    #[test]
    fn no_categories_no_records() {
        let mut grid = CellGrid::new();
        grid.set(1, 4, "Quoted").unwrap();
        grid.set(6, 3, "Tooling A").unwrap();
        grid.set(6, 4, 12.5).unwrap();

        let layout = Layout::default();
        let detection = detect_metric_columns(&grid, &layout);
        let records = extract_core_metrics(&grid, &layout, &[], &detection.columns, 3, &Enrichment::default());
        assert!(records.is_empty());
    }
}
