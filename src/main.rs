// Entry point and high-level CLI flow.
//
// Interactive by default:
// - Option [1] loads the delivery export and prints diagnostics.
// - Option [2] finds contracted actuals, writes the reconciled table and a
//   JSON summary, and previews the per line item totals.
// With `--batch` both steps run once without prompting.
use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::error;

use revenue_recon::loader::{self, LoadReport};
use revenue_recon::logging::init_logging;
use revenue_recon::{output, reports, util, ReconConfig, Table};

/// Reconcile ad delivery and spend against contracted line item goals
#[derive(Parser, Debug)]
#[command(name = "revenue_recon", version)]
struct Cli {
    /// Delivery export to reconcile (CSV with a header row)
    #[arg(short, long, default_value = "delivery.csv")]
    input: PathBuf,

    /// Where to write the reconciled table
    #[arg(short, long, default_value = "reconciled.csv")]
    output: PathBuf,

    /// Rewrite the input file instead of writing to --output
    #[arg(long)]
    in_place: bool,

    /// TOML file overriding header or output column names
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Where to write the JSON summary
    #[arg(long, default_value = "recon_summary.json")]
    summary: PathBuf,

    /// Load and reconcile once, without the menu
    #[arg(long)]
    batch: bool,

    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn target(&self) -> &PathBuf {
        if self.in_place {
            &self.input
        } else {
            &self.output
        }
    }
}

// The loaded table is kept between menu choices so the file is read once
// but can be reconciled repeatedly.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Table>,
}

/// `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn print_load_report(table: &Table, report: &LoadReport) {
    println!(
        "Loaded {} rows across {} columns.",
        util::format_int(report.total_rows),
        util::format_int(table.header.len())
    );
    if report.padded_rows > 0 || report.truncated_rows > 0 {
        println!(
            "Note: {} short rows padded, {} long rows truncated to the header width.",
            util::format_int(report.padded_rows),
            util::format_int(report.truncated_rows)
        );
    }
    println!();
}

/// Handle option [1]: load the delivery export into `APP_STATE`.
fn handle_load(cli: &Cli) {
    match loader::load_table(&cli.input) {
        Ok((table, report)) => {
            print_load_report(&table, &report);
            let mut state = APP_STATE.lock().unwrap_or_else(|e| e.into_inner());
            state.data = Some(table);
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}\n", cli.input.display(), e);
        }
    }
}

/// Reconcile `table`, write the results and print the line item preview.
fn run_reconcile(cli: &Cli, config: &ReconConfig, table: &Table) -> Result<()> {
    loader::require_rows(table)?;

    let result = revenue_recon::reconcile_with(table, config)?;
    let target = cli.target();
    output::write_table_csv(target, &result.table)
        .with_context(|| format!("writing {}", target.display()))?;

    let summary_rows = reports::line_item_summary(&result);
    let stats = reports::generate_summary(&result);
    output::write_json(&cli.summary, &stats)
        .with_context(|| format!("writing {}", cli.summary.display()))?;

    println!("Contracted Actuals by Line Item\n");
    output::preview_table_rows(&summary_rows, 10);
    println!(
        "({} rows across {} line items written to {})",
        util::format_int(stats.total_rows),
        util::format_int(stats.total_line_items),
        target.display()
    );
    println!(
        "Total spend: {}  Extra spend: {}\n",
        util::format_number(stats.total_spend, 2),
        util::format_number(stats.total_extra_spend, 2)
    );
    Ok(())
}

/// Handle option [2]: find contracted actuals for the loaded table.
fn handle_reconcile(cli: &Cli, config: &ReconConfig) {
    let data = {
        let state = APP_STATE.lock().unwrap_or_else(|e| e.into_inner());
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the file first (option 1).\n");
        return;
    };

    if let Err(e) = run_reconcile(cli, config, &data) {
        error!("reconciliation failed: {:#}", e);
        eprintln!("{:#}\n", e);
    }
}

fn run_batch(cli: &Cli, config: &ReconConfig) -> Result<()> {
    let (table, report) = loader::load_table(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    print_load_report(&table, &report);
    run_reconcile(cli, config, &table)
}

fn run_menu(cli: &Cli, config: &ReconConfig) {
    loop {
        println!("Revenue Reconciliation:");
        println!("[1] Load the file");
        println!("[2] Find Contracted Actual\n");
        let Some(choice) = read_choice() else {
            break;
        };
        match choice.as_str() {
            "1" => handle_load(cli),
            "2" => {
                println!();
                handle_reconcile(cli, config);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
}

fn load_config(cli: &Cli) -> Result<ReconConfig> {
    match &cli.config {
        Some(path) => ReconConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ReconConfig::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(&cli).and_then(|config| {
        if cli.batch {
            run_batch(&cli, &config)
        } else {
            run_menu(&cli, &config);
            Ok(())
        }
    });

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
