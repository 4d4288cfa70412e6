use analytics::{PropertyReport, ReportAssumptions};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{Config, LoggingSettings, OutputFormat};
use database::{connect, DbRepository};
use reporter::{LosReport, ReportRequest, Reporter};
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// The main entry point for the PropTech reporting tool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config().context("Failed to load configuration")?;
    // Held until exit so the file writer flushes.
    let _log_guard = init_tracing(&config.logging)?;

    let db_pool = connect(&config.database)
        .await
        .context("Failed to connect to the database")?;
    let db_repo = DbRepository::new(db_pool);
    let today = Local::now().date_naive();

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config, &db_repo, today).await,
        Commands::LosPackage(args) => handle_los_package(args, &config, &db_repo, today).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Property metrics and reporting for parcels, buildings and units.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the property report for a single unit.
    Report(ReportArgs),
    /// Export the LOS underwriting package and loan tape QC flags for a unit.
    LosPackage(LosArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// The unit to report on.
    #[arg(long)]
    unit_id: Uuid,

    /// Lookback window for meter readings, in days. Defaults to `report.days_back`.
    #[arg(long)]
    days_back: Option<u32>,

    /// Market cap rate used for the implied value (e.g. 0.06).
    #[arg(long)]
    assumed_cap_rate: Option<f64>,

    /// Outstanding loan balance. LTV is reported only when positive.
    #[arg(long)]
    loan_balance: Option<f64>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Parser)]
struct LosArgs {
    /// The unit to export.
    #[arg(long)]
    unit_id: Uuid,

    /// Automated valuation model estimate, if one exists.
    #[arg(long)]
    avm_value: Option<f64>,

    /// Date of the valuation (format: YYYY-MM-DD).
    #[arg(long)]
    valuation_date: Option<NaiveDate>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber: stderr always, plus a daily file when
/// `logging.directory` is configured. `RUST_LOG` wins over `logging.level`.
fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log filter '{}'", settings.level))?;

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles the `report` command. CLI flags override the `[report]` config section.
async fn handle_report(
    args: ReportArgs,
    config: &Config,
    db_repo: &DbRepository,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let defaults = &config.report;
    let request = ReportRequest {
        unit_id: args.unit_id,
        assumptions: ReportAssumptions {
            window_days: args.days_back.unwrap_or(defaults.days_back),
            assumed_cap_rate: args.assumed_cap_rate.unwrap_or(defaults.assumed_cap_rate),
            loan_balance: args.loan_balance.unwrap_or(defaults.loan_balance),
        },
    };
    tracing::debug!(?request, "Report request resolved.");

    let report = Reporter::new()
        .run(db_repo, &request, today)
        .await
        .with_context(|| format!("Failed to build the report for unit {}", args.unit_id))?;

    match args.format.unwrap_or(defaults.format) {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => println!("{}", report_table(&report)),
    }
    Ok(())
}

/// Handles the `los-package` command.
async fn handle_los_package(
    args: LosArgs,
    config: &Config,
    db_repo: &DbRepository,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let los = Reporter::new()
        .los_package(db_repo, args.unit_id, args.avm_value, args.valuation_date, today)
        .await
        .with_context(|| format!("Failed to build the LOS package for unit {}", args.unit_id))?;

    match args.format.unwrap_or(config.report.format) {
        OutputFormat::Json => print_json(&los)?,
        OutputFormat::Table => println!("{}", los_table(&los)),
    }
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn report_table(report: &PropertyReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Section", "Metric", "Value"]);
    let rows: Vec<(&str, &str, String)> = vec![
        ("parcel", "muni_id", report.parcel.muni_id.clone()),
        ("parcel", "zoning", report.parcel.zoning.clone()),
        ("building", "age_years", report.building.age_years.to_string()),
        ("building", "floors", report.building.floors.to_string()),
        ("building", "bua_m2", format!("{:.2}", report.building.bua_m2)),
        ("unit", "use_type", report.unit.use_type.clone()),
        ("unit", "nla_m2", format!("{:.2}", report.unit.nla_m2)),
        ("unit", "floor_no", report.unit.floor_no.to_string()),
        ("leases", "active_count", report.leases.active_count.to_string()),
        ("leases", "rent_monthly_total", format!("{:.2}", report.leases.rent_monthly_total)),
        ("valuation", "assumed_cap_rate", format!("{:.4}", report.valuation.assumed_cap_rate)),
        ("valuation", "noi_annual", format!("{:.2}", report.valuation.noi_annual)),
        ("valuation", "implied_value", format!("{:.2}", report.valuation.implied_value)),
        (
            "valuation",
            "ltv_from_input_balance",
            or_dash(report.valuation.ltv_from_input_balance.map(|v| format!("{v:.4}"))),
        ),
        ("compliance", "days_since_occupancy", or_dash(report.compliance.days_since_occupancy)),
        ("compliance", "title_clean", report.compliance.title_clean.to_string()),
        ("energy", "kwh_per_m2_day", format!("{:.4}", report.energy.kwh_per_m2_day)),
        ("energy", "window_days", report.energy.window_days.to_string()),
        ("_meta", "generated_on", report.meta.generated_on.to_string()),
    ];
    for (section, metric, value) in rows {
        table.add_row(vec![section.to_string(), metric.to_string(), value]);
    }
    table
}

fn los_table(los: &LosReport) -> Table {
    let package = &los.package;
    let mut table = Table::new();
    table.set_header(vec!["Section", "Field", "Value"]);
    let rows: Vec<(&str, &str, String)> = vec![
        ("parcel", "id", package.parcel.id.to_string()),
        ("parcel", "muni_id", package.parcel.muni_id.clone()),
        ("parcel", "zoning", package.parcel.zoning.clone()),
        ("building", "id", package.building.id.to_string()),
        ("building", "year_built", package.building.year_built.to_string()),
        ("unit", "id", package.unit.id.to_string()),
        ("unit", "use_type", package.unit.use_type.clone()),
        ("unit", "nla_m2", format!("{:.2}", package.unit.nla_m2)),
        ("title", "present", package.title.present.to_string()),
        ("title", "deed_no", or_dash(package.title.deed_no.as_ref())),
        ("title", "clean", package.title.clean.to_string()),
        ("permit_occupancy", "present", package.permit_occupancy.present.to_string()),
        ("permit_occupancy", "completed_on", or_dash(package.permit_occupancy.completed_on)),
        ("valuation", "avm_value", or_dash(package.valuation.avm_value.map(|v| format!("{v:.2}")))),
        ("valuation", "valuation_date", or_dash(package.valuation.valuation_date)),
        ("tape_qc", "valuation_missing", los.tape_qc.valuation_missing.to_string()),
        ("tape_qc", "permit_stale", los.tape_qc.permit_stale.to_string()),
        ("tape_qc", "title_not_clean", los.tape_qc.title_not_clean.to_string()),
        ("_meta", "generated_on", package.generated_on.to_string()),
    ];
    for (section, field, value) in rows {
        table.add_row(vec![section.to_string(), field.to_string(), value]);
    }
    table
}
