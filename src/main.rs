use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use expense_sheets::cli::{self, ConfigOverrides};
use expense_sheets::error::SheetsResult;
use expense_sheets::types::FormulaDialect;
use expense_sheets::writer::LayoutFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "expense-sheets")]
#[command(about = "Generate a multi-year expense/income tracking workbook (.xlsx)")]
#[command(long_about = "Expense Sheets - expense/income workbook generator

Builds one Index sheet, one sheet per year and twelve month sheets per year,
wired together with cross-sheet SUM formulas:

  Index      Year | Total Expenses | Total Income
  2024       Category | Amount | Total Expenses | Freelance | Company | Total Income
  2024.1..12 Category | Amount, freelance and company income tables, summary

COMMANDS:
  generate   - Write the workbook
  layout     - Print the cells and formulas that would be written
  check      - Compare an existing workbook against the template
  init       - Write a default config file

EXAMPLES:
  expense-sheets generate budget.xlsx
  expense-sheets generate --start-year 2023 --end-year 2024 budget.xlsx
  expense-sheets layout --sheet 2024.1
  expense-sheets check --config template.yaml budget.xlsx")]
#[command(version)]
struct Cli {
    /// Show verbose output (also enables info logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Template inputs shared by every command that builds a layout
#[derive(Args, Debug, Clone)]
struct TemplateOpts {
    /// YAML config file
    #[arg(short, long, env = "EXPENSE_SHEETS_CONFIG")]
    config: Option<PathBuf>,

    /// First year to generate (default: config, else current year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Last year to generate, inclusive
    #[arg(long)]
    end_year: Option<i32>,

    /// Expense category, repeatable; replaces the configured list
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Range style: sheets (B2:B) or excel (B2:B1048576)
    #[arg(long)]
    dialect: Option<FormulaDialect>,
}

impl From<TemplateOpts> for ConfigOverrides {
    fn from(opts: TemplateOpts) -> Self {
        ConfigOverrides {
            config: opts.config,
            start_year: opts.start_year,
            end_year: opts.end_year,
            categories: opts.categories,
            dialect: opts.dialect,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Generate the workbook and write it as .xlsx.

Sheet order: Index, then for each year the year sheet followed by its
month sheets 1..12 (named '{year}.{month}', month unpadded).

EXAMPLE:
  expense-sheets generate --category Housing --category Food budget.xlsx")]
    /// Write the workbook to an .xlsx file
    Generate {
        #[command(flatten)]
        template: TemplateOpts,

        /// Output Excel file path (.xlsx)
        output: PathBuf,
    },

    #[command(long_about = "Print the layout descriptors (cells, formulas, styles) without
writing a workbook. Useful for reviewing formulas or diffing two configs.

EXAMPLES:
  expense-sheets layout --sheet 2024
  expense-sheets layout --format json -o layout.json")]
    /// Print the generated layout as YAML or JSON
    Layout {
        #[command(flatten)]
        template: TemplateOpts,

        /// Only print this sheet
        #[arg(long)]
        sheet: Option<String>,

        /// Output format: yaml or json (default: from --output extension, else yaml)
        #[arg(short, long)]
        format: Option<LayoutFormat>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    #[command(long_about = "Check that an existing workbook still matches the template.

Reports missing or extra sheets, sheet order changes, and any header,
category or formula cell whose content differs from what 'generate'
would write. Exits non-zero on any difference.")]
    /// Compare an .xlsx file against the template
    Check {
        #[command(flatten)]
        template: TemplateOpts,

        /// Workbook to check (.xlsx)
        workbook: PathBuf,
    },

    /// Write a default config file
    Init {
        /// Config file path
        #[arg(default_value = "expense-sheets.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> SheetsResult<()> {
    let verbose = cli.verbose;

    match cli.command {
        Commands::Generate { template, output } => cli::generate(template.into(), output, verbose),

        Commands::Layout {
            template,
            sheet,
            format,
            output,
        } => cli::layout(template.into(), sheet, format, output),

        Commands::Check { template, workbook } => cli::check(template.into(), workbook, verbose),

        Commands::Init { path, force } => cli::init(path, force),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
