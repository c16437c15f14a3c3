use crate::config::{default_config_yaml, load_config};
use crate::core::build_workbook;
use crate::error::{SheetsError, SheetsResult};
use crate::excel::{WorkbookExporter, WorkbookInspector};
use crate::types::{FormulaDialect, TemplateConfig, WorkbookLayout};
use crate::writer::{render_layout, LayoutFormat};
use chrono::Datelike;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Values given on the command line, applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub categories: Vec<String>,
    pub dialect: Option<FormulaDialect>,
}

/// Load the config file (if any), apply overrides and validate
pub fn resolve_config(overrides: &ConfigOverrides) -> SheetsResult<TemplateConfig> {
    let mut config = match &overrides.config {
        Some(path) => load_config(path)?,
        None => TemplateConfig::default(),
    };

    if let Some(year) = overrides.start_year {
        config.start_year = year;
    }
    if let Some(year) = overrides.end_year {
        config.end_year = year;
    }
    if !overrides.categories.is_empty() {
        config.categories = overrides.categories.clone();
    }
    if let Some(dialect) = overrides.dialect {
        config.dialect = dialect;
    }

    config.validate()?;
    debug!(?config, "resolved config");
    Ok(config)
}

/// Execute the generate command
pub fn generate(overrides: ConfigOverrides, output: PathBuf, verbose: bool) -> SheetsResult<()> {
    println!("{}", "📒 Expense Sheets - Generate".bold().green());
    println!("   Output: {}\n", output.display());

    let config = resolve_config(&overrides)?;

    if verbose {
        print_config(&config);
    }

    let layout = build_workbook(&config);

    if verbose {
        println!("{}", "📊 Writing workbook...".cyan());
        for sheet in &layout.sheets {
            println!(
                "   {} {} cells",
                sheet.name.bright_blue(),
                sheet.cells.len()
            );
        }
        println!();
    }

    let sheet_count = layout.sheets.len();
    let formula_count = layout.formula_count();
    WorkbookExporter::new(layout).export(&output)?;

    println!("{}", "✅ Workbook generated!".bold().green());
    println!("   Sheets:   {}", sheet_count);
    println!("   Formulas: {}", formula_count);
    println!("   File:     {}\n", output.display());

    Ok(())
}

/// Execute the layout command
pub fn layout(
    overrides: ConfigOverrides,
    sheet: Option<String>,
    format: Option<LayoutFormat>,
    output: Option<PathBuf>,
) -> SheetsResult<()> {
    let format = format
        .or_else(|| output.as_deref().map(LayoutFormat::from_path))
        .unwrap_or_default();

    let config = resolve_config(&overrides)?;
    let layout = select_sheet(build_workbook(&config), sheet.as_deref())?;
    let rendered = render_layout(&layout, format)?;

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            println!(
                "{} {}",
                "✅ Layout written to".bold().green(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn select_sheet(layout: WorkbookLayout, sheet: Option<&str>) -> SheetsResult<WorkbookLayout> {
    let Some(name) = sheet else {
        return Ok(layout);
    };

    let selected: Vec<_> = layout
        .sheets
        .into_iter()
        .filter(|s| s.name == name)
        .collect();

    if selected.is_empty() {
        return Err(SheetsError::Config(format!(
            "No sheet named '{}' in the generated layout",
            name
        )));
    }

    Ok(WorkbookLayout { sheets: selected })
}

/// Execute the check command
pub fn check(overrides: ConfigOverrides, workbook: PathBuf, verbose: bool) -> SheetsResult<()> {
    println!("{}", "🔍 Expense Sheets - Check".bold().green());
    println!("   Workbook: {}\n", workbook.display());

    let config = resolve_config(&overrides)?;
    if verbose {
        print_config(&config);
    }

    let layout = build_workbook(&config);
    let mut inspector = WorkbookInspector::open(&workbook)?;
    let report = inspector.check(&layout)?;

    println!("   Checked {} cells", report.cells_checked);

    if report.is_clean() {
        println!("{}", "✅ Workbook matches the template!".bold().green());
        return Ok(());
    }

    for name in &report.missing_sheets {
        println!("   {} {}", "missing sheet:".red(), name);
    }
    for name in &report.extra_sheets {
        println!("   {} {}", "extra sheet:".yellow(), name);
    }
    if !report.order_matches {
        println!("   {}", "sheet order differs".yellow());
    }
    for m in &report.mismatches {
        println!(
            "   {}!{}",
            m.sheet.bright_blue().bold(),
            m.cell.bright_blue().bold()
        );
        println!("      Expected: {}", m.expected.green());
        println!(
            "      Found:    {}",
            m.found.as_deref().unwrap_or("(empty)").red()
        );
    }

    println!(
        "\n{}",
        format!(
            "❌ Workbook differs from the template ({} cell mismatches)",
            report.mismatches.len()
        )
        .bold()
        .red()
    );

    Err(SheetsError::Drift(format!(
        "{} cell mismatches, {} missing sheets, {} extra sheets",
        report.mismatches.len(),
        report.missing_sheets.len(),
        report.extra_sheets.len()
    )))
}

/// Execute the init command
pub fn init(path: PathBuf, force: bool) -> SheetsResult<()> {
    if path.exists() && !force {
        return Err(SheetsError::Config(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let year = chrono::Local::now().year();
    write_default_config(&path, year)?;

    println!(
        "{} {}",
        "✅ Config written to".bold().green(),
        path.display()
    );
    println!(
        "   Run 'expense-sheets generate --config {} budget.xlsx'",
        path.display()
    );
    Ok(())
}

fn write_default_config(path: &Path, year: i32) -> SheetsResult<()> {
    fs::write(path, default_config_yaml(year))?;
    Ok(())
}

fn print_config(config: &TemplateConfig) {
    println!("{}", "📖 Template".cyan());
    println!("   Years:      {}-{}", config.start_year, config.end_year);
    println!("   Categories: {}", config.categories.join(", "));
    println!("   Dialect:    {:?}", config.dialect);
    println!("   Index:      {:?}", config.index_totals);
    println!("   Income:     {:?}\n", config.income_rows);
}
