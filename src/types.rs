use chrono::Datelike;
use serde::{Deserialize, Serialize};

//==============================================================================
// Template Configuration
//==============================================================================

/// Categories used when a config does not list its own
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Housing",
    "Utilities",
    "Food",
    "Transportation",
    "Health",
    "Insurance",
    "Entertainment",
    "Shopping",
    "Education",
    "Other",
];

/// Name of the top-level summary sheet
pub const DEFAULT_INDEX_SHEET: &str = "Index";

/// How open-ended column ranges are written into formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaDialect {
    /// Google Sheets style: `B2:B`
    #[default]
    Sheets,
    /// Bounded to the last worksheet row: `B2:B1048576`
    Excel,
}

impl std::str::FromStr for FormulaDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sheets" => Ok(FormulaDialect::Sheets),
            "excel" => Ok(FormulaDialect::Excel),
            other => Err(format!(
                "unknown dialect '{}' (expected 'sheets' or 'excel')",
                other
            )),
        }
    }
}

/// Which year sheet each index row reads its totals from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTotals {
    /// Every row reads `C2`/`F2` of the first year's sheet
    #[default]
    FirstYear,
    /// Each row reads its own year's sheet
    EachYear,
}

/// Which month-sheet income rows feed the year sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeRows {
    /// Only the first income entry (row 3) of each month
    #[default]
    FirstRow,
    /// Every income entry from row 3 down
    FullColumn,
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_index_sheet_name() -> String {
    DEFAULT_INDEX_SHEET.to_string()
}

/// Generator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "current_year")]
    pub start_year: i32,

    #[serde(default = "current_year")]
    pub end_year: i32,

    /// Expense categories, in row order
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_index_sheet_name")]
    pub index_sheet_name: String,

    #[serde(default)]
    pub dialect: FormulaDialect,

    #[serde(default)]
    pub index_totals: IndexTotals,

    #[serde(default)]
    pub income_rows: IncomeRows,
}

impl TemplateConfig {
    /// Config covering `start_year..=end_year` with the default categories
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            categories: default_categories(),
            index_sheet_name: default_index_sheet_name(),
            dialect: FormulaDialect::default(),
            index_totals: IndexTotals::default(),
            income_rows: IncomeRows::default(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dialect(mut self, dialect: FormulaDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_index_totals(mut self, index_totals: IndexTotals) -> Self {
        self.index_totals = index_totals;
        self
    }

    pub fn with_income_rows(mut self, income_rows: IncomeRows) -> Self {
        self.income_rows = income_rows;
        self
    }

    /// Years in range, ascending
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start_year..=self.end_year
    }

    pub fn year_count(&self) -> usize {
        self.years().count()
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        let year = current_year();
        Self::new(year, year)
    }
}

//==============================================================================
// Layout Descriptors
//==============================================================================

/// The three sheet kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SheetKind {
    Index,
    Year { year: i32 },
    Month { year: i32, month: u32 },
}

/// What a cell holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Formula text including the leading `=`
    Formula(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn formula(s: impl Into<String>) -> Self {
        CellValue::Formula(s.into())
    }

    pub fn as_formula(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Presentation hint, resolved to a concrete format by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    /// Column header row
    Header,
    /// Sub-table title above a header row
    Title,
    #[default]
    Label,
    Currency,
    /// Summary/total values
    Total,
}

/// One cell in A1 coordinates (lettered column, 1-based row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub column: String,
    pub row: u32,
    pub value: CellValue,
    #[serde(default)]
    pub style: CellStyle,
}

impl Cell {
    pub fn new(column: impl Into<String>, row: u32, value: CellValue, style: CellStyle) -> Self {
        Self {
            column: column.into(),
            row,
            value,
            style,
        }
    }

    /// A1 reference, e.g. `B2`
    pub fn reference(&self) -> String {
        format!("{}{}", self.column, self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnWidth {
    pub column: String,
    pub width: f64,
}

/// Everything needed to write one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub name: String,
    pub kind: SheetKind,
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub column_widths: Vec<ColumnWidth>,
}

impl SheetLayout {
    pub fn new(name: impl Into<String>, kind: SheetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cells: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    pub fn push(&mut self, column: &str, row: u32, value: CellValue, style: CellStyle) {
        self.cells.push(Cell::new(column, row, value, style));
    }

    pub fn set_width(&mut self, column: &str, width: f64) {
        self.column_widths.push(ColumnWidth {
            column: column.to_string(),
            width,
        });
    }

    /// Look up a cell by A1 reference
    pub fn cell(&self, reference: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.reference() == reference)
    }

    /// Formula text at an A1 reference, if that cell holds one
    pub fn formula(&self, reference: &str) -> Option<&str> {
        self.cell(reference).and_then(|c| c.value.as_formula())
    }

    pub fn text(&self, reference: &str) -> Option<&str> {
        self.cell(reference).and_then(|c| c.value.as_text())
    }

    pub fn formula_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(|c| matches!(c.value, CellValue::Formula(_)))
    }
}

/// The full descriptor set for one generated workbook
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkbookLayout {
    pub sheets: Vec<SheetLayout>,
}

impl WorkbookLayout {
    pub fn sheet(&self, name: &str) -> Option<&SheetLayout> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn formula_count(&self) -> usize {
        self.sheets.iter().map(|s| s.formula_cells().count()).sum()
    }
}
