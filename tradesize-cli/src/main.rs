//! TradeSize CLI: scriptable front-end over the calculator core.
//!
//! Commands:
//! - `size`: lots required for LONG and SHORT from a candle and a target
//! - `instruments`: list the configured instruments
//! - `analyze`: ask the AI advisory service for a candle read

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::debug;

use tradesize_core::advisory::{AdvisoryClient, AdvisoryOutcome};
use tradesize_core::candle_store::INCONSISTENT_WARNING;
use tradesize_core::config::AppConfig;
use tradesize_core::domain::{AiAnalysis, CandleField, InstrumentId, TradeDirection};
use tradesize_core::logging;
use tradesize_core::session::CalculatorSession;
use tradesize_core::sizing::{format_lots, format_points, format_value_per_lot, profit_sentence, FORMULA};

#[derive(Parser)]
#[command(name = "tradesize", about = "TradeSize: position sizing from a single candle")]
struct Cli {
    /// Path to a TOML config file. Defaults to <config_dir>/tradesize/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging on stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the required position size for both directions.
    Size {
        #[command(flatten)]
        candle: CandleArgs,

        /// Target profit in dollars. Defaults to the configured value.
        #[arg(long, allow_negative_numbers = true)]
        target: Option<String>,

        /// Print the result as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List instruments and their lot sizes.
    Instruments,
    /// Ask the AI advisory service for a bias and per-direction strategy.
    Analyze {
        #[command(flatten)]
        candle: CandleArgs,
    },
}

/// Candle and instrument overrides shared by `size` and `analyze`.
/// Prices are parsed leniently: unusable text counts as 0.
#[derive(Args, Debug, Default)]
struct CandleArgs {
    #[arg(long, allow_negative_numbers = true)]
    open: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    high: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    low: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    close: Option<String>,

    /// Instrument id (see `tradesize instruments`).
    #[arg(long, conflicts_with = "lot_size")]
    instrument: Option<String>,

    /// Ad-hoc lot size instead of a configured instrument.
    #[arg(long, allow_negative_numbers = true)]
    lot_size: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { logging::VERBOSE_DIRECTIVE } else { logging::DEFAULT_DIRECTIVE };
    logging::init_stderr(directive)?;

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Size { candle, target, json } => run_size(&config, &candle, target.as_deref(), json),
        Commands::Instruments => run_instruments(&config),
        Commands::Analyze { candle } => run_analyze(&config, &candle),
    }
}

/// Build a session from config and apply command-line overrides.
fn build_session(config: &AppConfig, args: &CandleArgs) -> Result<CalculatorSession> {
    let mut session = CalculatorSession::from_config(config);

    let overrides = [
        (CandleField::Open, &args.open),
        (CandleField::High, &args.high),
        (CandleField::Low, &args.low),
        (CandleField::Close, &args.close),
    ];
    for (field, raw) in overrides {
        if let Some(raw) = raw {
            session.set_candle_field(field, raw);
        }
    }

    if let Some(id) = &args.instrument {
        let id = InstrumentId::new(id.as_str());
        if session.registry().get(&id).is_none() {
            let known: Vec<&str> = session.registry().iter().map(|i| i.id.as_str()).collect();
            bail!("unknown instrument '{id}'. Known: {}", known.join(", "));
        }
        session.select_instrument(&id);
    } else if let Some(lot_size) = &args.lot_size {
        let id = session
            .add_instrument("Custom", lot_size)
            .map_err(|e| anyhow!("--lot-size: {e}"))?;
        session.select_instrument(&id);
    }

    debug!(instrument = %session.selected_instrument().id, candle = ?session.candle(), "session ready");
    Ok(session)
}

fn run_size(config: &AppConfig, args: &CandleArgs, target: Option<&str>, as_json: bool) -> Result<()> {
    let mut session = build_session(config, args)?;
    if let Some(raw) = target {
        session.set_target_profit(raw);
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&size_report(&session))?);
    } else {
        print_size(&session);
    }
    Ok(())
}

fn size_report(session: &CalculatorSession) -> serde_json::Value {
    let candle = session.candle();
    let inst = session.selected_instrument();
    let results: Vec<serde_json::Value> = session
        .results()
        .iter()
        .map(|r| {
            json!({
                "direction": r.direction.label(),
                "active": r.is_active(candle),
                "points_captured": r.points_captured,
                "value_per_lot": r.value_per_lot,
                "required_lots": r.required_lots,
            })
        })
        .collect();

    json!({
        "instrument": { "id": inst.id.as_str(), "name": inst.name, "lot_size": inst.lot_size },
        "candle": { "open": candle.open, "high": candle.high, "low": candle.low, "close": candle.close },
        "target_profit": session.target_profit(),
        "inconsistent": session.is_inconsistent(),
        "results": results,
    })
}

fn print_size(session: &CalculatorSession) {
    let candle = session.candle();
    let inst = session.selected_instrument();

    println!();
    println!("=== Position Size ===");
    println!("Instrument:     {} (lot {})", inst.name, inst.lot_size);
    println!(
        "Candle:         O {}  H {}  L {}  C {}",
        candle.open, candle.high, candle.low, candle.close
    );
    println!("Target Profit:  ${}", session.target_profit());
    if session.is_inconsistent() {
        println!();
        println!("{INCONSISTENT_WARNING}");
    }

    for result in session.results() {
        let marker = if result.is_active(candle) { " (active)" } else { "" };
        println!();
        println!("--- {}{marker} ---", result.direction.label());
        println!("Required Lots:  {}", format_lots(result.required_lots));
        println!("Risk Gap (pts): {}", format_points(result.points_captured));
        println!("Value per Lot:  ${}", format_value_per_lot(result.value_per_lot));
        println!("{}", profit_sentence(&result, session.target_profit()));
    }

    println!();
    println!("{FORMULA}");
}

fn run_instruments(config: &AppConfig) -> Result<()> {
    let session = CalculatorSession::from_config(config);
    let registry = session.registry();

    println!("{:<12} {:<24} {:>10}", "Id", "Name", "Lot Size");
    println!("{}", "-".repeat(48));
    for (i, inst) in registry.iter().enumerate() {
        let marker = if i == registry.selected_index() { "*" } else { "" };
        println!("{:<12} {:<24} {:>10}{marker}", inst.id.as_str(), inst.name, inst.lot_size);
    }
    Ok(())
}

fn run_analyze(config: &AppConfig, args: &CandleArgs) -> Result<()> {
    let mut session = build_session(config, args)?;

    let client = AdvisoryClient::from_config(&config.advisory.clone().with_env_credential());
    let Some(request) = session.begin_analysis() else {
        bail!("an analysis is already in progress");
    };

    println!("Analyzing {} candle with {}...", request.instrument.name, client.provider_name());
    let outcome = client.analyze_candle_structure(&request.instrument, &request.candle);

    match outcome {
        AdvisoryOutcome::Analysis(analysis) => print_analysis(&analysis),
        AdvisoryOutcome::Absent { reason } => {
            println!("No analysis available");
            eprintln!("reason: {reason}");
        }
    }
    Ok(())
}

fn print_analysis(analysis: &AiAnalysis) {
    println!();
    println!("=== AI Analysis ===");
    println!("Bias:           {}", analysis.bias);
    println!("Reasoning:      {}", analysis.reasoning);
    for dir in TradeDirection::ALL {
        let s = analysis.strategy(dir);
        println!();
        println!("--- {} ({}%) ---", dir.label(), s.probability);
        println!("Suggested Entry: {}", s.entry_price);
        println!("Stop Loss:       {}", s.stop_loss_price);
        println!("Target:          {}", s.target_price);
    }
}
