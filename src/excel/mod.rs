//! Excel (.xlsx) adapter
//!
//! - Export: WorkbookLayout → .xlsx with formulas and formatting
//! - Inspect: .xlsx → sheet names and formulas, checked against a layout

mod exporter;
mod inspector;

pub use exporter::WorkbookExporter;
pub use inspector::{CellMismatch, CheckReport, WorkbookInspector};
