//! Workbook layout tests

use expense_sheets::core::build_workbook;
use expense_sheets::core::layout::{category_row, month_sheet, summary_header_row, year_sheet};
use expense_sheets::types::DEFAULT_CATEGORIES;
use expense_sheets::{CellStyle, IncomeRows, IndexTotals, SheetKind, TemplateConfig};
use pretty_assertions::assert_eq;

fn config(categories: &[&str]) -> TemplateConfig {
    TemplateConfig::new(2024, 2024).with_categories(categories.iter().copied())
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKBOOK STRUCTURE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_single_year_workbook() {
    let layout = build_workbook(&config(&["Housing", "Food"]));
    assert_eq!(layout.sheets.len(), 14);
    assert_eq!(layout.sheets[0].kind, SheetKind::Index);
    assert_eq!(layout.sheets[1].kind, SheetKind::Year { year: 2024 });
    for month in 1..=12u32 {
        let sheet = &layout.sheets[1 + month as usize];
        assert_eq!(sheet.kind, SheetKind::Month { year: 2024, month });
        assert_eq!(sheet.name, format!("2024.{}", month));
    }
}

#[test]
fn test_custom_index_sheet_name() {
    let mut cfg = config(&["Food"]);
    cfg.index_sheet_name = "Summary".to_string();
    let layout = build_workbook(&cfg);
    assert_eq!(layout.sheet_names()[0], "Summary");
}

#[test]
fn test_regeneration_is_identical() {
    let cfg = TemplateConfig::new(2022, 2024);
    assert_eq!(build_workbook(&cfg), build_workbook(&cfg));
}

// ═══════════════════════════════════════════════════════════════════════════
// ROW OFFSETS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_category_rows_match_on_year_and_month_sheets() {
    let cfg = TemplateConfig::new(2024, 2024);
    let year = year_sheet(&cfg, 2024);
    let month = month_sheet(&cfg, 2024, 6);

    for (i, category) in DEFAULT_CATEGORIES.iter().enumerate() {
        let reference = format!("A{}", category_row(i));
        assert_eq!(year.text(&reference), Some(*category));
        assert_eq!(month.text(&reference), Some(*category));
    }
}

#[test]
fn test_summary_block_follows_category_count() {
    for count in [1usize, 2, 5, 10] {
        let names: Vec<String> = (0..count).map(|i| format!("Cat{}", i)).collect();
        let cfg = TemplateConfig::new(2024, 2024).with_categories(names);
        let sheet = month_sheet(&cfg, 2024, 1);

        let header = summary_header_row(count);
        assert_eq!(header, count as u32 + 4);
        assert_eq!(sheet.text(&format!("C{}", header)), Some("Total Income"));
        assert_eq!(sheet.text(&format!("D{}", header)), Some("Total Expenses"));
        assert_eq!(
            sheet.formula(&format!("C{}", header + 1)),
            Some("=SUM(F3:F) + SUM(H3:H)")
        );
        assert_eq!(sheet.formula(&format!("D{}", header + 1)), Some("=SUM(B2:B)"));
        assert!(sheet.cell("C2").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// YEAR SHEET
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_year_sheet_headers() {
    let sheet = year_sheet(&config(&["Housing"]), 2024);
    let headers: Vec<&str> = ["A1", "B1", "C1", "D1", "E1", "F1"]
        .iter()
        .map(|r| sheet.text(r).unwrap())
        .collect();
    assert_eq!(
        headers,
        vec![
            "Category",
            "Amount",
            "Total Expenses",
            "Freelance Income",
            "Company Income",
            "Total Income"
        ]
    );
    assert!(sheet
        .cells
        .iter()
        .filter(|c| c.row == 1)
        .all(|c| c.style == CellStyle::Header));
}

#[test]
fn test_year_sheet_total_expenses_independent_of_categories() {
    for categories in [&["A"][..], &["A", "B", "C", "D"][..]] {
        let sheet = year_sheet(&config(categories), 2024);
        assert_eq!(sheet.formula("C2"), Some("=SUM(B2:B)"));
    }
}

#[test]
fn test_year_sheet_income_reads_first_entry_row() {
    let sheet = year_sheet(&config(&["Housing", "Food"]), 2025);
    let d2 = sheet.formula("D2").unwrap();
    let e2 = sheet.formula("E2").unwrap();
    assert!(d2.contains("'2025.1'!F3,"));
    assert!(d2.ends_with("'2025.12'!F3)"));
    assert!(e2.contains("'2025.6'!H3,"));
    assert!(!d2.contains("F3:F"));
}

#[test]
fn test_year_sheet_full_column_income() {
    let cfg = config(&["Housing"]).with_income_rows(IncomeRows::FullColumn);
    let sheet = year_sheet(&cfg, 2024);
    assert!(sheet.formula("E2").unwrap().contains("'2024.3'!H3:H,"));
}

// ═══════════════════════════════════════════════════════════════════════════
// INDEX SHEET
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_index_sheet_single_year() {
    let layout = build_workbook(&config(&["Housing", "Food"]));
    let index = layout.sheet("Index").unwrap();
    assert_eq!(index.text("A1"), Some("Year"));
    assert_eq!(index.text("B1"), Some("Total Expenses"));
    assert_eq!(index.text("C1"), Some("Total Income"));
    assert_eq!(index.formula("B2"), Some("='2024'!C2"));
    assert_eq!(index.formula("C2"), Some("='2024'!F2"));
    assert_eq!(index.text("A3"), Some("Total"));
    assert_eq!(index.formula("B3"), Some("=SUM(B2:B2)"));
}

#[test]
fn test_index_sheet_multi_year_default_reads_first_year() {
    let layout = build_workbook(&TemplateConfig::new(2020, 2022));
    let index = layout.sheet("Index").unwrap();
    assert_eq!(index.formula("B4"), Some("='2020'!C2"));
}

#[test]
fn test_index_sheet_multi_year_each_year() {
    let cfg = TemplateConfig::new(2020, 2022).with_index_totals(IndexTotals::EachYear);
    let layout = build_workbook(&cfg);
    let index = layout.sheet("Index").unwrap();
    assert_eq!(index.formula("B4"), Some("='2022'!C2"));
    assert_eq!(index.formula("C5"), Some("=SUM(C2:C4)"));
}
