//! Template configuration loading and validation

use crate::core::formula::{month_sheet_name, year_sheet_name, MONTHS};
use crate::error::{SheetsError, SheetsResult};
use crate::types::{TemplateConfig, DEFAULT_CATEGORIES};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Excel's limit on worksheet name length
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Read a YAML config file and validate it
pub fn load_config(path: &Path) -> SheetsResult<TemplateConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SheetsError::Config(format!("Failed to read config '{}': {}", path.display(), e))
    })?;
    let config = parse_config(&content)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse and validate YAML config text
pub fn parse_config(content: &str) -> SheetsResult<TemplateConfig> {
    let config: TemplateConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl TemplateConfig {
    /// Check the config describes a workbook a spreadsheet host will accept
    pub fn validate(&self) -> SheetsResult<()> {
        if self.start_year > self.end_year {
            return Err(SheetsError::Config(format!(
                "start_year {} is after end_year {}",
                self.start_year, self.end_year
            )));
        }

        for year in [self.start_year, self.end_year] {
            if !(1000..=9999).contains(&year) {
                return Err(SheetsError::Config(format!(
                    "year {} is not a 4-digit year",
                    year
                )));
            }
        }

        if self.categories.is_empty() {
            return Err(SheetsError::Config(
                "at least one category is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.trim().is_empty() {
                return Err(SheetsError::Config(
                    "category names must not be blank".to_string(),
                ));
            }
            if !seen.insert(category.as_str()) {
                return Err(SheetsError::Config(format!(
                    "duplicate category '{}'",
                    category
                )));
            }
        }

        self.validate_index_sheet_name()
    }

    fn validate_index_sheet_name(&self) -> SheetsResult<()> {
        let name = &self.index_sheet_name;

        if name.trim().is_empty() {
            return Err(SheetsError::Config(
                "index_sheet_name must not be blank".to_string(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(SheetsError::Config(format!(
                "index_sheet_name '{}' is longer than {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
            return Err(SheetsError::Config(format!(
                "index_sheet_name '{}' contains forbidden character '{}'",
                name, c
            )));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(SheetsError::Config(format!(
                "index_sheet_name '{}' must not start or end with an apostrophe",
                name
            )));
        }

        let collides = self.years().any(|year| {
            year_sheet_name(year) == *name
                || MONTHS.clone().any(|month| month_sheet_name(year, month) == *name)
        });
        if collides {
            return Err(SheetsError::Config(format!(
                "index_sheet_name '{}' clashes with a year or month sheet",
                name
            )));
        }

        Ok(())
    }
}

/// Default config file contents written by `init`
pub fn default_config_yaml(year: i32) -> String {
    let mut out = String::new();
    out.push_str("# expense-sheets workbook template\n");
    out.push_str("#\n");
    out.push_str("# One year sheet and twelve month sheets are generated per year.\n");
    out.push_str(&format!("start_year: {}\n", year));
    out.push_str(&format!("end_year: {}\n", year));
    out.push('\n');
    out.push_str("# Rows on every year and month sheet, in this order\n");
    out.push_str("categories:\n");
    for category in DEFAULT_CATEGORIES {
        out.push_str(&format!("  - {}\n", category));
    }
    out.push('\n');
    out.push_str("index_sheet_name: Index\n");
    out.push('\n');
    out.push_str("# sheets: open ranges like B2:B | excel: bounded ranges like B2:B1048576\n");
    out.push_str("dialect: sheets\n");
    out.push('\n');
    out.push_str("# first_year: every index row reads the first year's totals\n");
    out.push_str("# each_year: each index row reads its own year's totals\n");
    out.push_str("index_totals: first_year\n");
    out.push('\n');
    out.push_str("# first_row: only the first income entry of each month is rolled up\n");
    out.push_str("# full_column: every income entry is rolled up\n");
    out.push_str("income_rows: first_row\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FormulaDialect, IncomeRows, IndexTotals};

    #[test]
    fn test_default_config_yaml_parses() {
        let config = parse_config(&default_config_yaml(2024)).unwrap();
        assert_eq!(config, TemplateConfig::new(2024, 2024));
        assert_eq!(config.dialect, FormulaDialect::Sheets);
        assert_eq!(config.index_totals, IndexTotals::FirstYear);
        assert_eq!(config.income_rows, IncomeRows::FirstRow);
    }

    #[test]
    fn test_reversed_years_rejected() {
        let err = TemplateConfig::new(2025, 2024).validate().unwrap_err();
        assert!(err.to_string().contains("after end_year"));
    }

    #[test]
    fn test_non_four_digit_year_rejected() {
        assert!(TemplateConfig::new(999, 2024).validate().is_err());
        assert!(TemplateConfig::new(2024, 10000).validate().is_err());
    }

    #[test]
    fn test_category_rules() {
        let empty: Vec<String> = Vec::new();
        assert!(TemplateConfig::new(2024, 2024)
            .with_categories(empty)
            .validate()
            .is_err());
        assert!(TemplateConfig::new(2024, 2024)
            .with_categories(["Food", "  "])
            .validate()
            .is_err());
        let err = TemplateConfig::new(2024, 2024)
            .with_categories(["Food", "Rent", "Food"])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate category 'Food'"));
    }

    #[test]
    fn test_index_sheet_name_rules() {
        let mut config = TemplateConfig::new(2024, 2024);

        config.index_sheet_name = "Summary".to_string();
        assert!(config.validate().is_ok());

        config.index_sheet_name = "2024.7".to_string();
        assert!(config.validate().is_err());

        config.index_sheet_name = "2024".to_string();
        assert!(config.validate().is_err());

        config.index_sheet_name = "Totals/Year".to_string();
        assert!(config.validate().is_err());

        config.index_sheet_name = "x".repeat(32);
        assert!(config.validate().is_err());

        config.index_sheet_name = "x".repeat(31);
        assert!(config.validate().is_ok());

        for name in ["'Index", "Index'", "'Index'"] {
            config.index_sheet_name = name.to_string();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("apostrophe"), "{}", name);
        }

        config.index_sheet_name = "Bob's Index".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/expense-sheets.yaml")).unwrap_err();
        assert!(matches!(err, SheetsError::Config(_)));
    }
}
