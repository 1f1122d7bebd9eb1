//! Tracing subscriber setup for the binaries.
//!
//! `RUST_LOG` overrides the default directive. The CLI logs to stderr; the
//! TUI owns the terminal, so it logs to a file instead.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "tradesize_core=info,tradesize_tui=info,tradesize_cli=info,warn";
pub const VERBOSE_DIRECTIVE: &str = "tradesize_core=debug,tradesize_cli=debug,tradesize_tui=debug,info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("install tracing subscriber: {0}")]
    Install(String),
}

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Log to stderr.
pub fn init_stderr(default_directive: &str) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive))
        .with_target(true)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

/// Append to `path`, creating parent directories as needed.
pub fn init_file(path: &Path, default_directive: &str) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open { path: path.to_path_buf(), source })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

/// `<data_local_dir>/tradesize/tradesize.log`, falling back to the working directory.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tradesize")
        .join("tradesize.log")
}
