//! Read-back of generated workbooks and drift checking

use crate::error::{SheetsError, SheetsResult};
use crate::types::{CellValue, SheetLayout, WorkbookLayout};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// A cell whose content differs from the generated layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellMismatch {
    pub sheet: String,
    pub cell: String,
    pub expected: String,
    /// `None` when the cell is empty in the workbook
    pub found: Option<String>,
}

/// Result of comparing a workbook on disk against a layout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckReport {
    pub missing_sheets: Vec<String>,
    pub extra_sheets: Vec<String>,
    /// Shared sheets appear in the same relative order
    pub order_matches: bool,
    pub mismatches: Vec<CellMismatch>,
    pub cells_checked: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing_sheets.is_empty()
            && self.extra_sheets.is_empty()
            && self.order_matches
            && self.mismatches.is_empty()
    }
}

/// Opens an .xlsx file for inspection
pub struct WorkbookInspector {
    workbook: Xlsx<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl WorkbookInspector {
    pub fn open<P: AsRef<Path>>(path: P) -> SheetsResult<Self> {
        let path = path.as_ref();
        let workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            SheetsError::Import(format!(
                "Failed to open Excel file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let sheet_names = workbook.sheet_names().to_vec();

        Ok(Self {
            workbook,
            sheet_names,
        })
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Formula text at an A1 reference, with a leading `=`
    pub fn formula(&mut self, sheet: &str, column: &str, row: u32) -> SheetsResult<Option<String>> {
        let formulas = self.formula_range(sheet)?;
        Ok(Self::formula_at(&formulas, column, row))
    }

    /// Compare every text, number and formula cell of `layout` with the workbook
    pub fn check(&mut self, layout: &WorkbookLayout) -> SheetsResult<CheckReport> {
        let expected = layout.sheet_names();

        let missing_sheets: Vec<String> = expected
            .iter()
            .filter(|name| !self.sheet_names.iter().any(|s| s == *name))
            .map(|name| name.to_string())
            .collect();
        let extra_sheets: Vec<String> = self
            .sheet_names
            .iter()
            .filter(|s| !expected.contains(&s.as_str()))
            .cloned()
            .collect();

        let shared_expected: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|name| self.sheet_names.iter().any(|s| s == name))
            .collect();
        let shared_found: Vec<&str> = self
            .sheet_names
            .iter()
            .map(String::as_str)
            .filter(|s| expected.contains(s))
            .collect();

        let mut report = CheckReport {
            order_matches: shared_expected == shared_found,
            missing_sheets,
            extra_sheets,
            ..CheckReport::default()
        };

        for sheet in &layout.sheets {
            if report.missing_sheets.contains(&sheet.name) {
                continue;
            }
            self.check_sheet(sheet, &mut report)?;
        }

        debug!(
            cells = report.cells_checked,
            mismatches = report.mismatches.len(),
            "checked workbook"
        );
        Ok(report)
    }

    fn check_sheet(&mut self, sheet: &SheetLayout, report: &mut CheckReport) -> SheetsResult<()> {
        let values = self.value_range(&sheet.name)?;
        let formulas = self.formula_range(&sheet.name)?;

        for cell in &sheet.cells {
            report.cells_checked += 1;

            let (expected, found) = match &cell.value {
                CellValue::Formula(f) => (
                    f.clone(),
                    Self::formula_at(&formulas, &cell.column, cell.row),
                ),
                CellValue::Text(t) => (t.clone(), Self::value_at(&values, &cell.column, cell.row)),
                CellValue::Number(n) => (
                    n.to_string(),
                    Self::value_at(&values, &cell.column, cell.row),
                ),
            };

            if found.as_deref() != Some(expected.as_str()) {
                report.mismatches.push(CellMismatch {
                    sheet: sheet.name.clone(),
                    cell: cell.reference(),
                    expected,
                    found,
                });
            }
        }

        Ok(())
    }

    fn value_range(&mut self, sheet: &str) -> SheetsResult<Range<Data>> {
        self.workbook.worksheet_range(sheet).map_err(|e| {
            SheetsError::Import(format!("Failed to read sheet '{}': {}", sheet, e))
        })
    }

    fn formula_range(&mut self, sheet: &str) -> SheetsResult<Range<String>> {
        self.workbook.worksheet_formula(sheet).map_err(|e| {
            SheetsError::Import(format!("Failed to read formulas of '{}': {}", sheet, e))
        })
    }

    fn position(column: &str, row: u32) -> Option<(u32, u32)> {
        let col = crate::core::formula::column_letter_to_index(column)?;
        Some((row.checked_sub(1)?, col as u32))
    }

    fn formula_at(range: &Range<String>, column: &str, row: u32) -> Option<String> {
        let pos = Self::position(column, row)?;
        range
            .get_value(pos)
            .filter(|f| !f.is_empty())
            .map(|f| {
                if f.starts_with('=') {
                    f.clone()
                } else {
                    format!("={}", f)
                }
            })
    }

    fn value_at(range: &Range<Data>, column: &str, row: u32) -> Option<String> {
        let pos = Self::position(column, row)?;
        match range.get_value(pos)? {
            Data::Empty => None,
            Data::String(s) => Some(s.clone()),
            Data::Float(f) => Some(f.to_string()),
            Data::Int(i) => Some((*i as f64).to_string()),
            other => Some(other.to_string()),
        }
    }
}
