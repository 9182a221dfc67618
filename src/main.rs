//! Entry point for the Malta Wage binary.
//!
//! `malta-wage calc` runs one calculation from command line flags and
//! prints the itemized result.  `malta-wage serve` starts the HTTP API.
//! Both accept an alternative policy file; without one the built-in
//! Malta 2026 single-filer policy is used.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use malta_wage::money::parse_decimal;
use malta_wage::report::{PayrollReport, ReportLanguage};
use malta_wage::{api, CommitmentTier, PayrollEngine, PayrollInput, PayrollPolicy, RateLevel};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Net salary estimator for Maltese employees (single filer, 2026).
#[derive(Debug, Parser)]
#[command(name = "malta-wage", version)]
struct Cli {
    /// JSON policy file replacing the built-in rates and tables.
    #[arg(long, global = true, env = "WAGE_POLICY_FILE")]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute one salary breakdown and print it.
    Calc(CalcArgs),
    /// Serve the HTTP API.
    Serve {
        /// Address to bind.
        #[arg(long, env = "WAGE_BIND_ADDR", default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

#[derive(Debug, Args)]
struct CalcArgs {
    /// Bonus-free gross monthly wage in euros (e.g. `2,000` or `€2,000.50`).
    #[arg(long, value_parser = parse_amount)]
    base: Decimal,

    #[arg(long)]
    birth_year: i32,

    #[arg(long, default_value = "0", value_parser = parse_amount)]
    overtime_hours: Decimal,

    #[arg(long, default_value = "0", value_parser = parse_amount)]
    night_hours: Decimal,

    /// Total table hours (basis for SGC and performance bonuses).
    #[arg(long, default_value = "0", value_parser = parse_amount)]
    table_hours: Decimal,

    #[arg(long, default_value = "0", value_parser = parse_amount)]
    card_hours: Decimal,

    #[arg(long, default_value = "0", value_parser = parse_amount)]
    roulette_hours: Decimal,

    /// Receives the card bonus.
    #[arg(long)]
    card: bool,

    /// Receives the roulette bonus.
    #[arg(long)]
    roulette: bool,

    /// SGC bonus level: 1 or 2.
    #[arg(long, default_value = "1")]
    sgc_level: RateLevel,

    /// Performance bonus level: 1 or 2.
    #[arg(long, default_value = "1")]
    performance_level: RateLevel,

    /// Commitment tier in percent: 10, 20, 30, 40 or 50.
    #[arg(long, default_value = "10")]
    commitment: CommitmentTier,

    /// Report language: en or tr.
    #[arg(long, default_value = "en")]
    lang: ReportLanguage,

    /// Print the raw breakdown as JSON instead of the report.
    #[arg(long)]
    json: bool,
}

impl CalcArgs {
    fn to_input(&self) -> PayrollInput {
        PayrollInput {
            base_monthly_wage: self.base,
            birth_year: self.birth_year,
            overtime_hours: self.overtime_hours,
            night_hours: self.night_hours,
            table_hours: self.table_hours,
            card_hours: self.card_hours,
            roulette_hours: self.roulette_hours,
            card_eligible: self.card,
            roulette_eligible: self.roulette,
            sgc_level: self.sgc_level,
            performance_level: self.performance_level,
            commitment_tier: self.commitment,
        }
    }
}

fn parse_amount(s: &str) -> Result<Decimal, String> {
    parse_decimal(s).map_err(|e| e.to_string())
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn run_calc(policy: &PayrollPolicy, args: &CalcArgs) -> anyhow::Result<()> {
    let input = args.to_input();
    debug!(?input, "calculating");

    let breakdown = PayrollEngine::new(policy).compute(&input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{}", PayrollReport::new(&breakdown, args.lang));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let policy = PayrollPolicy::load_or_default(cli.policy.as_deref())
        .context("failed to load payroll policy")?;
    info!(policy = %policy.name, "using payroll policy");

    match cli.command {
        Command::Calc(args) => run_calc(&policy, &args),
        Command::Serve { addr } => api::serve(&addr, policy).await,
    }
}
