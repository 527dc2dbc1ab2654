//! # Metric Extraction Module
//!
//! Heuristics that locate the meaningful regions of a SMITCH sheet (metric
//! header row, category markers, subcategory labels, OH/LAB section) without
//! a fixed schema, and turn them into a flat list of [`ExtractedRecord`]s.
//!
//! Every detector is a pure function of the grid. An extraction never fails:
//! missing markers shrink the output and are reported to the injected
//! [`Diagnostics`] sink.
use crate::extraction::diagnostics::LOG_TARGET;
use crate::spreadsheet::CellGrid;

pub mod apw;
pub mod category;
pub mod date;
pub mod diagnostics;
pub mod ebit;
pub mod enrichment;
pub mod header;
pub mod layout;
pub mod metric;
pub mod record;
pub mod subcategory;

pub use category::Category;
pub use diagnostics::Diagnostics;
pub use diagnostics::LogDiagnostics;
pub use diagnostics::SilentDiagnostics;
pub use enrichment::PlantMatch;
pub use header::HeaderDetection;
pub use header::MetricColumn;
pub use layout::Layout;
pub use record::Enrichment;
pub use record::ExtractedRecord;

/// Regions detected on one sheet, before any value is read.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetLayout {
    pub headers: HeaderDetection,
    /// Sorted by row ascending
    pub categories: Vec<Category>,
    pub subcategory_column: usize,
    pub plant: Option<PlantMatch>,
    pub part_name: Option<String>,
}

impl SheetLayout {
    pub fn enrichment(&self) -> Enrichment {
        Enrichment {
            plant: self.plant.as_ref().map(|plant| plant.name.clone()),
            part_name: self.part_name.clone(),
        }
    }
}

/// Runs every detector and extractor over a grid.
#[derive(Clone, Debug, Default)]
pub struct Extractor<D: Diagnostics = LogDiagnostics> {
    layout: Layout,
    diagnostics: D,
}

impl<D: Diagnostics> Extractor<D> {
    pub fn new(layout: Layout, diagnostics: D) -> Self {
        Self { layout, diagnostics }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Detects the sheet regions without extracting values.
    pub fn analyze(&self, grid: &CellGrid) -> SheetLayout {
        let headers = header::detect_metric_columns(grid, &self.layout);
        let categories = category::detect_categories(grid, &self.layout);
        let subcategory_column = subcategory::find_subcategory_column(grid, &categories, &self.layout);
        let plant = enrichment::detect_plant(grid, &self.layout);
        let part_name = enrichment::detect_part_name(grid, &categories, &self.layout);

        log::debug!(
            target: LOG_TARGET,
            "Header row {:?} with {} metric columns, {} categories, subcategories in column {}",
            headers.header_row,
            headers.columns.len(),
            categories.len(),
            subcategory_column
        );
        if let Some(plant) = &plant {
            log::trace!(target: LOG_TARGET, "Plant '{}' found on row {}", plant.name, plant.row);
        }

        SheetLayout {
            headers,
            categories,
            subcategory_column,
            plant,
            part_name,
        }
    }

    /// Extracts core metrics, then the weekly APW value, then the OH/LAB
    /// section, in that order.
    pub fn extract(&self, grid: &CellGrid) -> Vec<ExtractedRecord> {
        if grid.is_empty() {
            self.diagnostics.error("Sheet has no cells, nothing to extract");
            return Vec::new();
        }

        let sheet = self.analyze(grid);
        if sheet.headers.is_fallback() {
            self.diagnostics.warn("No metric header row found, using default metric columns");
        }
        if sheet.categories.is_empty() {
            self.diagnostics.warn("No categories found, skipping core metrics");
        }
        let enrichment = sheet.enrichment();

        let mut records = metric::extract_core_metrics(
            grid,
            &self.layout,
            &sheet.categories,
            &sheet.headers.columns,
            sheet.subcategory_column,
            &enrichment,
        );
        let core = records.len();
        records.extend(apw::extract_weekly_apw(grid, &self.layout, &enrichment));
        let apw = records.len() - core;
        records.extend(ebit::extract_ebit_metrics(
            grid,
            &self.layout,
            &sheet.categories,
            &enrichment,
            &self.diagnostics,
        ));
        log::debug!(
            target: LOG_TARGET,
            "Extracted {} records ({} core, {} weekly APW, {} OH/LAB)",
            records.len(),
            core,
            apw,
            records.len() - core - apw
        );
        records
    }
}

/// Extracts a grid with the default layout, logging diagnostics.
pub fn extract(grid: &CellGrid) -> Vec<ExtractedRecord> {
    Extractor::<LogDiagnostics>::default().extract(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingDiagnostics {
        warnings: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl Diagnostics for RecordingDiagnostics {
        fn warn(&self, message: &str) {
            self.warnings.borrow_mut().push(message.to_owned());
        }

        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_owned());
        }
    }

    fn scenario() -> CellGrid {
        let mut grid = CellGrid::new();
        grid.set(1, 4, "Quoted Cost/pc 03/01/2024").unwrap();
        grid.set(5, 1, "S").unwrap();
        grid.set(6, 3, "Tooling A").unwrap();
        grid.set(6, 4, 12.5).unwrap();
        grid
    }

    #[test]
    fn end_to_end_scenario() {
        let records = extract(&scenario());
        assert_eq!(
            records,
            vec![ExtractedRecord {
                category: "Sales Price".to_owned(),
                subcategory: "Tooling A".to_owned(),
                metric: "Quoted".to_owned(),
                value: 12.5,
                date: NaiveDate::from_ymd_opt(2024, 3, 1),
                plant: None,
                part_name: None,
            }]
        );
        assert_eq!(records[0].date.unwrap().to_string(), "2024-03-01");
    }

    #[test]
    fn extraction_is_deterministic() {
        let mut grid = scenario();
        grid.set(3, 2, "Front Bumper").unwrap();
        grid.set(7, 3, "Tooling B").unwrap();
        grid.set(1, 1, "Weekly APW").unwrap();
        grid.set(1, 2, 320.0).unwrap();
        grid.set(31, 4, "Quoted Cost/pc").unwrap();
        grid.set(32, 2, "OH").unwrap();
        grid.set(32, 4, 1.0).unwrap();
        grid.set(33, 2, "LAB TOTAL").unwrap();
        grid.set(33, 4, 2.0).unwrap();
        grid.set(40, 1, "Wellington Plant").unwrap();

        let extractor = Extractor::new(Layout::default(), SilentDiagnostics);
        let first = extractor.extract(&grid);
        let second = extractor.extract(&grid);
        assert_eq!(first, second);

        let summary: Vec<_> = first
            .iter()
            .map(|r| (r.category.as_str(), r.subcategory.as_str(), r.metric.as_str(), r.value))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Sales Price", "Tooling A", "Quoted", 12.5),
                ("EBIT LOSS", "Weekly APW", "Weekly APW Value", 320.0),
                ("Sales Price", "OH", "Quoted_Cost", 1.0),
                ("Sales Price", "LAB Total", "Quoted_Cost", 2.0),
            ]
        );
        assert!(first.iter().all(|r| r.plant.as_deref() == Some("Wellington")));
        assert!(first.iter().all(|r| r.part_name.as_deref() == Some("Front Bumper")));
    }

    #[test]
    fn missing_categories_still_run_other_extractors() {
        let mut grid = CellGrid::new();
        grid.set(1, 4, "Quoted").unwrap();
        grid.set(6, 3, "Tooling A").unwrap();
        grid.set(6, 4, 12.5).unwrap();
        grid.set(8, 1, "Weekly APW").unwrap();
        grid.set(8, 2, "$90").unwrap();

        let diagnostics = RecordingDiagnostics::default();
        let extractor = Extractor::new(Layout::default(), &diagnostics);
        let records = extractor.extract(&grid);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subcategory, "Weekly APW");
        assert_eq!(records[0].value, 90.0);
        assert!(diagnostics
            .warnings
            .borrow()
            .iter()
            .any(|warning| warning.contains("No categories found")));
    }

    #[test]
    fn stop_without_headers_uses_fallback_columns() {
        let mut grid = CellGrid::new();
        grid.set(2, 3, "Demonstrated Rate at 100%").unwrap();
        grid.set(5, 1, "S").unwrap();
        grid.set(6, 3, "Tooling A").unwrap();
        grid.set(6, 4, 12.5).unwrap();

        let diagnostics = RecordingDiagnostics::default();
        let records = Extractor::new(Layout::default(), &diagnostics).extract(&grid);

        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.category.as_str(), r.subcategory.as_str(), r.metric.as_str(), r.value))
            .collect();
        assert_eq!(summary, vec![("Sales Price", "Tooling A", "Column_d", 12.5)]);
        assert!(diagnostics
            .warnings
            .borrow()
            .iter()
            .any(|warning| warning.contains("No metric header row found")));
    }

    #[test]
    fn empty_grid() {
        let diagnostics = RecordingDiagnostics::default();
        let records = Extractor::new(Layout::default(), &diagnostics).extract(&CellGrid::new());
        assert!(records.is_empty());
        assert_eq!(diagnostics.errors.borrow().len(), 1);
    }

    #[test]
    fn analyze_reports_regions() {
        let layout = Layout { ebit_row_cap: Some(40), ..Layout::default() };
        let extractor = Extractor::new(layout, SilentDiagnostics);
        assert_eq!(extractor.layout().ebit_row_cap, Some(40));

        let sheet = extractor.analyze(&scenario());
        assert_eq!(sheet.headers.header_row, Some(1));
        assert_eq!(sheet.categories.len(), 1);
        assert_eq!(sheet.subcategory_column, 3);
        assert_eq!(sheet.plant, None);
        assert_eq!(sheet.enrichment(), Enrichment::default());
    }
}
