//! Excel exporter implementation - WorkbookLayout → .xlsx

use crate::core::formula::column_letter_to_index;
use crate::error::{SheetsError, SheetsResult};
use crate::types::{Cell, CellStyle, CellValue, SheetLayout, WorkbookLayout};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

/// Currency number format used for amounts and totals
const CURRENCY_FORMAT: &str = "#,##0.00";

/// Concrete formats for each [`CellStyle`]
struct StyleFormats {
    header: Format,
    title: Format,
    label: Format,
    currency: Format,
    total: Format,
}

impl StyleFormats {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(0x4472C4)
            .set_font_color(0xFFFFFF)
            .set_border(FormatBorder::Thin);

        let title = Format::new().set_bold().set_italic();

        let label = Format::new();

        let currency = Format::new().set_num_format(CURRENCY_FORMAT);

        let total = Format::new()
            .set_bold()
            .set_num_format(CURRENCY_FORMAT)
            .set_border_top(FormatBorder::Thin);

        Self {
            header,
            title,
            label,
            currency,
            total,
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Header => &self.header,
            CellStyle::Title => &self.title,
            CellStyle::Label => &self.label,
            CellStyle::Currency => &self.currency,
            CellStyle::Total => &self.total,
        }
    }
}

/// Writes a [`WorkbookLayout`] to an .xlsx workbook
pub struct WorkbookExporter {
    layout: WorkbookLayout,
}

impl WorkbookExporter {
    pub fn new(layout: WorkbookLayout) -> Self {
        Self { layout }
    }

    /// Export the layout to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> SheetsResult<()> {
        let mut workbook = self.build()?;

        workbook
            .save(output_path)
            .map_err(|e| SheetsError::Export(format!("Failed to save Excel file: {}", e)))?;

        info!(
            path = %output_path.display(),
            sheets = self.layout.sheets.len(),
            "wrote workbook"
        );
        Ok(())
    }

    /// Render the workbook into an in-memory .xlsx buffer
    pub fn to_bytes(&self) -> SheetsResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| SheetsError::Export(format!("Failed to render Excel file: {}", e)))
    }

    fn build(&self) -> SheetsResult<Workbook> {
        let mut workbook = Workbook::new();
        let formats = StyleFormats::new();

        for sheet in &self.layout.sheets {
            let worksheet = workbook.add_worksheet();
            Self::write_sheet(worksheet, sheet, &formats)?;
        }

        Ok(workbook)
    }

    /// Write one sheet's cells, widths and frozen header row
    fn write_sheet(
        worksheet: &mut Worksheet,
        sheet: &SheetLayout,
        formats: &StyleFormats,
    ) -> SheetsResult<()> {
        worksheet.set_name(&sheet.name).map_err(|e| {
            SheetsError::Export(format!(
                "Failed to set worksheet name '{}': {}",
                sheet.name, e
            ))
        })?;

        for cell in &sheet.cells {
            Self::write_cell(worksheet, &sheet.name, cell, formats)?;
        }

        for width in &sheet.column_widths {
            let col = Self::column_index(&sheet.name, &width.column)?;
            worksheet.set_column_width(col, width.width)?;
        }

        worksheet.set_freeze_panes(1, 0)?;

        debug!(
            sheet = %sheet.name,
            cells = sheet.cells.len(),
            "wrote worksheet"
        );
        Ok(())
    }

    fn write_cell(
        worksheet: &mut Worksheet,
        sheet_name: &str,
        cell: &Cell,
        formats: &StyleFormats,
    ) -> SheetsResult<()> {
        let col = Self::column_index(sheet_name, &cell.column)?;
        // Descriptor rows are 1-based, the worksheet API is 0-based
        let row = cell.row.checked_sub(1).ok_or_else(|| {
            SheetsError::Export(format!("Invalid row 0 in sheet '{}'", sheet_name))
        })?;
        let format = formats.get(cell.style);

        let result = match &cell.value {
            CellValue::Text(text) => worksheet.write_string_with_format(row, col, text, format),
            CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, format),
            CellValue::Formula(f) => {
                worksheet.write_formula_with_format(row, col, Formula::new(f), format)
            }
        };

        result.map_err(|e| {
            SheetsError::Export(format!(
                "Failed to write {}!{}: {}",
                sheet_name,
                cell.reference(),
                e
            ))
        })?;
        Ok(())
    }

    fn column_index(sheet_name: &str, letters: &str) -> SheetsResult<u16> {
        column_letter_to_index(letters).ok_or_else(|| {
            SheetsError::Export(format!(
                "Invalid column '{}' in sheet '{}'",
                letters, sheet_name
            ))
        })
    }
}
