use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_report::config::{config_dir, config_file, load_config, CONFIG_TEMPLATE};
use sales_report::error::{ReportError, Result};
use sales_report::grid::PivotGrid;
use sales_report::report::{build_view, generate_report, LogProgress, ReportOutcome, View};
use sales_report::xlsx::read_first_sheet;

#[derive(Parser)]
#[command(name = "sales-report")]
#[command(version, about = "Sales transaction analyzer producing pivot workbooks", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Analyze a sales workbook and write the four-sheet report
    Analyze {
        /// Input workbook (first sheet is read)
        input: PathBuf,

        /// Output workbook path (default: <input>_analyzed.xlsx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Date used to name the sheets (YYYY-MM-DD, default: today)
        #[arg(long)]
        run_date: Option<String>,

        /// Copy the generated report to this file or directory
        #[arg(long, value_name = "DEST")]
        save_to: Option<PathBuf>,
    },

    /// Print a single view without writing a workbook
    Preview {
        /// Input workbook (first sheet is read)
        input: PathBuf,

        /// View to render
        #[arg(long, value_enum, default_value = "daily")]
        view: View,

        /// Number of rows to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show config location and effective settings
    Status,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        if e.is_insufficient_data() {
            eprintln!("Export a date range covering more days and run the analysis again.");
            std::process::exit(2);
        }
        std::process::exit(1);
    }
}

/// Initialize tracing from SALES_REPORT_LOG, falling back to the -v level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("SALES_REPORT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Analyze {
            input,
            output,
            run_date,
            save_to,
        } => cmd_analyze(&cfg_dir, &input, output, run_date, save_to),
        Commands::Preview {
            input,
            view,
            limit,
            json,
        } => cmd_preview(&cfg_dir, &input, view, limit, json),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with the template file
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(config_file(cfg_dir), CONFIG_TEMPLATE)?;

    println!("Initialized sales-report config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Map your input columns:  $EDITOR {}",
        config_file(cfg_dir).display()
    );
    println!("  2. Run an analysis:         sales-report analyze <sales.xlsx>");

    Ok(())
}

#[derive(Tabled)]
struct SheetRow {
    #[tabled(rename = "SHEET")]
    name: String,
    #[tabled(rename = "ROWS")]
    rows: usize,
    #[tabled(rename = "COLUMNS")]
    columns: usize,
}

fn parse_run_date(input: Option<String>) -> Result<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| ReportError::InvalidDate(s)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Analyze the input and write the report workbook
fn cmd_analyze(
    cfg_dir: &Path,
    input: &Path,
    output: Option<PathBuf>,
    run_date: Option<String>,
    save_to: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let run_date = parse_run_date(run_date)?;

    let outcome = generate_report(input, output.as_deref(), &config, run_date, &LogProgress)?;
    print_outcome(&outcome);

    if let Some(dest) = save_to {
        let saved = save_copy(&outcome.output, &dest)?;
        println!("  Copied: {}", saved.display());
    }

    Ok(())
}

fn print_outcome(outcome: &ReportOutcome) {
    let rows: Vec<SheetRow> = outcome
        .sheets
        .iter()
        .map(|s| SheetRow {
            name: s.name.clone(),
            rows: s.rows,
            columns: s.columns,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("Report saved: {}", outcome.output.display());
}

/// Copy the generated report to a user-chosen file or directory
fn save_copy(source: &Path, dest: &Path) -> Result<PathBuf> {
    let target = if dest.is_dir() {
        match source.file_name() {
            Some(name) => dest.join(name),
            None => dest.to_path_buf(),
        }
    } else {
        dest.to_path_buf()
    };
    std::fs::copy(source, &target)?;
    Ok(target)
}

/// Render one view to the terminal
fn cmd_preview(
    cfg_dir: &Path,
    input: &Path,
    view: View,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let rows = read_first_sheet(input, &config.input.date_format)?;
    let mut grid = build_view(&rows, &config, view)?;

    if let Some(n) = limit {
        grid.rows.truncate(n);
        for span in &mut grid.merges {
            span.end_row = span.end_row.min(n.saturating_sub(1));
        }
        grid.merges.retain(|m| m.end_row > m.start_row);
    }

    if json {
        let out = serde_json::to_string_pretty(&grid).map_err(|e| {
            ReportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
        })?;
        println!("{out}");
        return Ok(());
    }

    if grid.rows.is_empty() {
        println!("No rows in the {} view.", view_label(view));
        return Ok(());
    }
    println!("{}", render_grid(&grid));
    Ok(())
}

fn view_label(view: View) -> &'static str {
    match view {
        View::Daily => "daily",
        View::Customers => "customers",
        View::StyleCustomers => "style-customers",
        View::Style => "style",
    }
}

/// Table text for a grid; merged cells show their value on the first row only.
fn render_grid(grid: &PivotGrid) -> String {
    let mut builder = Builder::default();
    builder.push_record(grid.header.iter().cloned());

    for (idx, cells) in grid.rows.iter().enumerate() {
        let record = cells.iter().enumerate().map(|(col, cell)| {
            let continued = grid
                .merges
                .iter()
                .any(|m| m.column == col && idx > m.start_row && idx <= m.end_row);
            if continued {
                String::new()
            } else {
                cell.display()
            }
        });
        builder.push_record(record);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Show config location and effective settings
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let path = config_file(cfg_dir);

    println!("Sales Report Status");
    println!("{}", "-".repeat(50));
    if path.exists() {
        println!("Config file:      {} (active)", path.display());
    } else {
        println!("Config file:      {} (not found, using defaults)", path.display());
    }

    let columns = &config.input.columns;
    println!("Date format:      {}", config.input.date_format);
    println!(
        "Columns:          date={} customer={} product={} quantity={}",
        columns.date, columns.customer, columns.product, columns.quantity
    );
    println!(
        "Min columns:      {} (style pivot: {})",
        config.input.min_columns, config.input.style_min_columns
    );

    let t = &config.thresholds;
    println!("Min days:         {}", t.min_days);
    println!(
        "Thresholds:       customers>={} style>={} style+customer>={} (row total>={})",
        t.customer_day_min, t.style_latest_min, t.style_customer_last_day_min, t.style_customer_total_min
    );
    println!("Output suffix:    {}", config.output.suffix);

    Ok(())
}
