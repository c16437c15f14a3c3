//! Expense Sheets - multi-year expense/income workbook generator
//!
//! Builds a spreadsheet template for personal expense and income tracking:
//! one index sheet, one sheet per year, and twelve month sheets per year,
//! wired together with cross-sheet `SUM` formulas.
//!
//! Generation is split in two:
//!
//! - [`core`]: pure functions from a [`TemplateConfig`] to an immutable
//!   [`WorkbookLayout`] (cells, formulas, styles)
//! - [`excel`]: the adapter that writes a layout to an .xlsx file, and reads
//!   one back to check it still matches
//!
//! # Example
//!
//! ```no_run
//! use expense_sheets::core::build_workbook;
//! use expense_sheets::excel::WorkbookExporter;
//! use expense_sheets::TemplateConfig;
//! use std::path::Path;
//!
//! let config = TemplateConfig::new(2024, 2024).with_categories(["Housing", "Food"]);
//! config.validate()?;
//!
//! let layout = build_workbook(&config);
//! println!("Sheets: {}", layout.sheets.len());
//!
//! WorkbookExporter::new(layout).export(Path::new("budget.xlsx"))?;
//! # Ok::<(), expense_sheets::error::SheetsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{SheetsError, SheetsResult};
pub use types::{
    Cell, CellStyle, CellValue, FormulaDialect, IncomeRows, IndexTotals, SheetKind, SheetLayout,
    TemplateConfig, WorkbookLayout,
};
