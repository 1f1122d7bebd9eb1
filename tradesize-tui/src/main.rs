//! TradeSize TUI: position-sizing calculator with an optional AI candle read.
//!
//! Panels:
//! 1. Instruments: select, add and remove instruments
//! 2. Inputs: OHLC candle and target profit, edited live
//! 3. Results: LONG/SHORT sizing cards with the AI strategy per direction

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use tradesize_core::advisory::AdvisoryClient;
use tradesize_core::config::AppConfig;
use tradesize_core::logging;
use tradesize_core::session::CalculatorSession;

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

#[derive(Parser, Debug)]
#[command(name = "tradesize-tui", about = "TradeSize terminal calculator")]
struct Args {
    /// Path to config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // The terminal belongs to the UI, so logs go to a file.
    let log_path = logging::default_log_path();
    if let Err(e) = logging::init_file(&log_path, logging::DEFAULT_DIRECTIVE) {
        eprintln!("warning: file logging disabled: {e}");
    }

    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    info!(log = %log_path.display(), "tradesize-tui starting");

    let advisory_config = config.advisory.clone().with_env_credential();
    let client = AdvisoryClient::from_config(&advisory_config);
    let advisory_enabled = client.is_enabled();

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(client, cmd_rx, resp_tx).context("spawning worker thread")?;

    let mut app = AppState::new(CalculatorSession::from_config(&config), advisory_enabled, cmd_tx.clone(), resp_rx);
    if !advisory_enabled {
        app.set_warning("AI analysis disabled: no API key");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker. An in-flight call finishes before the thread sees this.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("tradesize-tui exiting");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::AnalysisDone { revision, outcome } => app.on_analysis_done(revision, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_forms() {
        let args = Args::try_parse_from(["tradesize-tui", "--config", "a.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("a.toml")));
        let args = Args::try_parse_from(["tradesize-tui", "--config=b.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("b.toml")));
        let args = Args::try_parse_from(["tradesize-tui"]).unwrap();
        assert_eq!(args.config, None);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["tradesize-tui", "--cofig", "x.toml"]).is_err());
        assert!(Args::try_parse_from(["tradesize-tui", "--config"]).is_err());
    }

    #[test]
    fn verify_args() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
