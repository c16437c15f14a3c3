//! Layout and formula generation
//!
//! Pure functions from a [`TemplateConfig`](crate::types::TemplateConfig) to an
//! immutable [`WorkbookLayout`](crate::types::WorkbookLayout). Nothing here
//! touches a document; see [`crate::excel`] for that.

pub mod formula;
pub mod layout;

pub use formula::{month_sheet_name, sum_across_months, year_sheet_name};
pub use layout::build_workbook;
