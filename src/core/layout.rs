//! Sheet layout builders
//!
//! Produces the immutable descriptor set for a workbook: one index sheet,
//! then for each year a year sheet followed by its twelve month sheets.
//!
//! Row layout shared by year and month sheets:
//!
//! ```text
//! row 1        headers
//! row i + 2    category i (0-based)
//! ```
//!
//! Month sheets also carry two income sub-tables (titles on row 1, headers on
//! row 2, entries from row 3) and a summary block at row `n + 4` where `n` is
//! the number of categories.

use super::formula::{
    cross_ref, month_sheet_name, open_range, sum_across_months, sum_range_across_months,
    year_sheet_name, MONTHS,
};
use crate::types::{
    CellStyle, CellValue, IncomeRows, IndexTotals, SheetKind, SheetLayout, TemplateConfig,
    WorkbookLayout,
};
use tracing::debug;

/// First row of income entries in a month sheet
pub const INCOME_FIRST_ROW: u32 = 3;

/// Row holding category `index` (0-based) on year and month sheets
pub fn category_row(index: usize) -> u32 {
    index as u32 + 2
}

/// Header row of the month summary block; values sit one row below
pub fn summary_header_row(category_count: usize) -> u32 {
    category_count as u32 + 4
}

/// Build the full descriptor set for `config`
pub fn build_workbook(config: &TemplateConfig) -> WorkbookLayout {
    let mut sheets = Vec::with_capacity(1 + config.year_count() * 13);
    sheets.push(index_sheet(config));

    for year in config.years() {
        sheets.push(year_sheet(config, year));
        for month in MONTHS {
            sheets.push(month_sheet(config, year, month));
        }
    }

    debug!(
        sheets = sheets.len(),
        start_year = config.start_year,
        end_year = config.end_year,
        "built workbook layout"
    );

    WorkbookLayout { sheets }
}

/// Index sheet: `Year | Total Expenses | Total Income`, one row per year, then totals
pub fn index_sheet(config: &TemplateConfig) -> SheetLayout {
    let mut sheet = SheetLayout::new(&config.index_sheet_name, SheetKind::Index);

    sheet.push("A", 1, CellValue::text("Year"), CellStyle::Header);
    sheet.push("B", 1, CellValue::text("Total Expenses"), CellStyle::Header);
    sheet.push("C", 1, CellValue::text("Total Income"), CellStyle::Header);

    let mut row = 2;
    for year in config.years() {
        let source = match config.index_totals {
            IndexTotals::FirstYear => config.start_year,
            IndexTotals::EachYear => year,
        };
        let source_sheet = year_sheet_name(source);

        sheet.push("A", row, CellValue::Number(year as f64), CellStyle::Label);
        sheet.push(
            "B",
            row,
            CellValue::formula(format!("={}", cross_ref(&source_sheet, "C2"))),
            CellStyle::Currency,
        );
        sheet.push(
            "C",
            row,
            CellValue::formula(format!("={}", cross_ref(&source_sheet, "F2"))),
            CellStyle::Currency,
        );
        row += 1;
    }

    let last = row - 1;
    sheet.push("A", row, CellValue::text("Total"), CellStyle::Total);
    sheet.push(
        "B",
        row,
        CellValue::formula(format!("=SUM(B2:B{})", last)),
        CellStyle::Total,
    );
    sheet.push(
        "C",
        row,
        CellValue::formula(format!("=SUM(C2:C{})", last)),
        CellStyle::Total,
    );

    sheet.set_width("A", 10.0);
    sheet.set_width("B", 16.0);
    sheet.set_width("C", 16.0);
    sheet
}

/// Year sheet: per-category annual totals plus expense and income rollups
pub fn year_sheet(config: &TemplateConfig, year: i32) -> SheetLayout {
    let mut sheet = SheetLayout::new(year_sheet_name(year), SheetKind::Year { year });

    for (column, header) in [
        ("A", "Category"),
        ("B", "Amount"),
        ("C", "Total Expenses"),
        ("D", "Freelance Income"),
        ("E", "Company Income"),
        ("F", "Total Income"),
    ] {
        sheet.push(column, 1, CellValue::text(header), CellStyle::Header);
    }

    for (i, category) in config.categories.iter().enumerate() {
        let row = category_row(i);
        sheet.push("A", row, CellValue::text(category), CellStyle::Label);
        sheet.push(
            "B",
            row,
            CellValue::formula(format!("={}", sum_across_months(year, "B", row))),
            CellStyle::Currency,
        );
    }

    sheet.push(
        "C",
        2,
        CellValue::formula(format!("=SUM({})", open_range(config.dialect, "B", 2))),
        CellStyle::Total,
    );
    sheet.push(
        "D",
        2,
        CellValue::formula(format!("={}", income_rollup(config, year, "F"))),
        CellStyle::Total,
    );
    sheet.push(
        "E",
        2,
        CellValue::formula(format!("={}", income_rollup(config, year, "H"))),
        CellStyle::Total,
    );
    sheet.push("F", 2, CellValue::formula("=D2+E2"), CellStyle::Total);

    sheet.set_width("A", 20.0);
    for column in ["B", "C", "D", "E", "F"] {
        sheet.set_width(column, 16.0);
    }
    sheet
}

// Monthly income amounts for one sub-table column, summed over the year.
fn income_rollup(config: &TemplateConfig, year: i32, column: &str) -> String {
    match config.income_rows {
        IncomeRows::FirstRow => sum_across_months(year, column, INCOME_FIRST_ROW),
        IncomeRows::FullColumn => sum_range_across_months(
            year,
            &open_range(config.dialect, column, INCOME_FIRST_ROW),
        ),
    }
}

/// Month sheet: category amounts, income sub-tables and a summary block
pub fn month_sheet(config: &TemplateConfig, year: i32, month: u32) -> SheetLayout {
    let mut sheet = SheetLayout::new(
        month_sheet_name(year, month),
        SheetKind::Month { year, month },
    );

    sheet.push("A", 1, CellValue::text("Category"), CellStyle::Header);
    sheet.push("B", 1, CellValue::text("Amount"), CellStyle::Header);

    for (i, category) in config.categories.iter().enumerate() {
        sheet.push("A", category_row(i), CellValue::text(category), CellStyle::Label);
    }

    sheet.push("E", 1, CellValue::text("Freelance Income"), CellStyle::Title);
    sheet.push("E", 2, CellValue::text("Source"), CellStyle::Header);
    sheet.push("F", 2, CellValue::text("Amount"), CellStyle::Header);

    sheet.push("G", 1, CellValue::text("Company Income"), CellStyle::Title);
    sheet.push("G", 2, CellValue::text("Company"), CellStyle::Header);
    sheet.push("H", 2, CellValue::text("Amount"), CellStyle::Header);

    // Columns C:D sit outside B2:B, so the expense total cannot reference itself.
    let header_row = summary_header_row(config.categories.len());
    let values_row = header_row + 1;
    sheet.push("C", header_row, CellValue::text("Total Income"), CellStyle::Header);
    sheet.push("D", header_row, CellValue::text("Total Expenses"), CellStyle::Header);
    sheet.push(
        "C",
        values_row,
        CellValue::formula(format!(
            "=SUM({}) + SUM({})",
            open_range(config.dialect, "F", INCOME_FIRST_ROW),
            open_range(config.dialect, "H", INCOME_FIRST_ROW)
        )),
        CellStyle::Total,
    );
    sheet.push(
        "D",
        values_row,
        CellValue::formula(format!("=SUM({})", open_range(config.dialect, "B", 2))),
        CellStyle::Total,
    );

    sheet.set_width("A", 20.0);
    sheet.set_width("B", 14.0);
    for column in ["C", "D"] {
        sheet.set_width(column, 16.0);
    }
    for column in ["E", "G"] {
        sheet.set_width(column, 20.0);
    }
    for column in ["F", "H"] {
        sheet.set_width(column, 14.0);
    }
    sheet
}
