//! Cross-sheet formula templating
//!
//! Every function here is pure string construction. Inputs are not
//! validated: a bad column or row yields a well-formed but meaningless
//! formula, which is left for the spreadsheet host to report.

use crate::types::FormulaDialect;
use std::ops::RangeInclusive;

/// Calendar months, 1-based
pub const MONTHS: RangeInclusive<u32> = 1..=12;

/// Last row of an .xlsx worksheet
pub const EXCEL_MAX_ROW: u32 = 1_048_576;

/// Year sheets are named by the bare year
pub fn year_sheet_name(year: i32) -> String {
    year.to_string()
}

/// Month sheets are named `{year}.{month}` with the month unpadded
///
/// Examples:
/// - (2024, 1) → `2024.1`
/// - (2024, 12) → `2024.12`
pub fn month_sheet_name(year: i32, month: u32) -> String {
    format!("{}.{}", year, month)
}

/// Quote a sheet name for use in a reference (`2024.1` → `'2024.1'`)
pub fn sheet_ref(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Reference to a cell or range on another sheet (`'2024.1'!B2`)
pub fn cross_ref(sheet: &str, target: &str) -> String {
    format!("{}!{}", sheet_ref(sheet), target)
}

/// Sum one cell across all twelve month sheets of `year`
///
/// Example:
/// - (2024, "B", 2) → `SUM('2024.1'!B2,'2024.2'!B2,...,'2024.12'!B2)`
pub fn sum_across_months(year: i32, column: &str, row: u32) -> String {
    sum_range_across_months(year, &format!("{}{}", column, row))
}

/// Sum the same cell or range across all twelve month sheets of `year`
pub fn sum_range_across_months(year: i32, target: &str) -> String {
    let refs: Vec<String> = MONTHS
        .map(|month| cross_ref(&month_sheet_name(year, month), target))
        .collect();
    format!("SUM({})", refs.join(","))
}

/// A column range from `start_row` to the bottom of the sheet
///
/// - Sheets: `B2:B`
/// - Excel: `B2:B1048576`
pub fn open_range(dialect: FormulaDialect, column: &str, start_row: u32) -> String {
    match dialect {
        FormulaDialect::Sheets => format!("{}{}:{}", column, start_row, column),
        FormulaDialect::Excel => format!("{}{}:{}{}", column, start_row, column, EXCEL_MAX_ROW),
    }
}

/// Convert an Excel column letter to a 0-based index (`AA` → 26)
///
/// Returns `None` for empty input, non-letters, or columns past `XFD`.
pub fn column_letter_to_index(letters: &str) -> Option<u16> {
    if letters.is_empty() {
        return None;
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        index = index * 26 + digit;
        if index > 16_384 {
            return None;
        }
    }

    Some((index - 1) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_sheet_name_unpadded() {
        assert_eq!(month_sheet_name(2024, 1), "2024.1");
        assert_eq!(month_sheet_name(2024, 9), "2024.9");
        assert_eq!(month_sheet_name(2024, 12), "2024.12");
    }

    #[test]
    fn test_sheet_ref_quotes() {
        assert_eq!(sheet_ref("2024.3"), "'2024.3'");
        assert_eq!(sheet_ref("Bob's"), "'Bob''s'");
        assert_eq!(cross_ref("2024", "C2"), "'2024'!C2");
    }

    #[test]
    fn test_sum_across_months() {
        let formula = sum_across_months(2024, "B", 2);
        assert!(formula.starts_with("SUM('2024.1'!B2,'2024.2'!B2,"));
        assert!(formula.ends_with(",'2024.12'!B2)"));

        let inner = &formula["SUM(".len()..formula.len() - 1];
        let refs: Vec<&str> = inner.split(',').collect();
        assert_eq!(refs.len(), 12);
        for (i, r) in refs.iter().enumerate() {
            assert_eq!(*r, format!("'2024.{}'!B2", i + 1));
        }
    }

    #[test]
    fn test_sum_across_months_garbage_in() {
        assert_eq!(
            sum_across_months(-5, "", 0),
            "SUM('-5.1'!0,'-5.2'!0,'-5.3'!0,'-5.4'!0,'-5.5'!0,'-5.6'!0,\
             '-5.7'!0,'-5.8'!0,'-5.9'!0,'-5.10'!0,'-5.11'!0,'-5.12'!0)"
        );
    }

    #[test]
    fn test_open_range() {
        assert_eq!(open_range(FormulaDialect::Sheets, "B", 2), "B2:B");
        assert_eq!(open_range(FormulaDialect::Excel, "F", 3), "F3:F1048576");
    }

    #[test]
    fn test_column_letter_to_index() {
        assert_eq!(column_letter_to_index("A"), Some(0));
        assert_eq!(column_letter_to_index("h"), Some(7));
        assert_eq!(column_letter_to_index("AA"), Some(26));
        assert_eq!(column_letter_to_index("XFD"), Some(16_383));
        assert_eq!(column_letter_to_index("XFE"), None);
        assert_eq!(column_letter_to_index(""), None);
        assert_eq!(column_letter_to_index("B2"), None);
    }
}
