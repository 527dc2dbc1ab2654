//! # SMITCH Metric Extractor
//!
//! Heuristic extraction of metric records from loosely structured SMITCH
//! costing sheets. A sheet is handed over as a [`CellGrid`]; the extractor
//! locates its regions without a fixed schema and emits a flat list of
//! [`ExtractedRecord`]s.
//!
//! ## Features
//!
//! - **Metric header detection**: picks the widest header row near the top of
//!   the sheet, honouring a "Demonstrated rate at 100%" stop column
//! - **Category bands**: single-letter markers (S, M, I, T, C, H) split the
//!   sheet into contiguous row bands
//! - **Header normalization**: free-text headers map to canonical metric labels
//!   (`Quoted`, `Plex`, `Actual`, ...), with dates picked out of the header text
//! - **Weekly APW and OH/LAB sections**: marker-driven extraction of EBIT loss
//!   values
//! - **Never fails on odd sheets**: missing regions shrink the output and are
//!   reported through an injected [`Diagnostics`] sink
//!
//! ```
//! use smitch_extractor::{extract, CellGrid};
//!
//! let mut grid = CellGrid::new();
//! grid.set(1, 4, "Quoted Cost/pc 03/01/2024").unwrap();
//! grid.set(5, 1, "S").unwrap();
//! grid.set(6, 3, "Tooling A").unwrap();
//! grid.set(6, 4, 12.5).unwrap();
//!
//! let records = extract(&grid);
//! assert_eq!(records[0].category, "Sales Price");
//! assert_eq!(records[0].metric, "Quoted");
//! ```
mod error;
mod helpers;

pub mod extraction;
pub mod spreadsheet;

pub use error::SmitchError;
pub use extraction::extract;
pub use extraction::Diagnostics;
pub use extraction::ExtractedRecord;
pub use extraction::Extractor;
pub use extraction::Layout;
pub use extraction::LogDiagnostics;
pub use extraction::SilentDiagnostics;
pub use spreadsheet::CellGrid;
pub use spreadsheet::CellValue;
