//! Background worker thread: advisory calls run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! handles one command at a time; the UI's busy flag keeps at most one
//! analysis in flight.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::debug;
use tradesize_core::advisory::{AdvisoryClient, AdvisoryOutcome};
use tradesize_core::session::AdvisoryRequest;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Analyze(AdvisoryRequest),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    AnalysisDone { revision: u64, outcome: AdvisoryOutcome },
}

/// Spawn the background worker thread. It owns the advisory client.
pub fn spawn_worker(
    client: AdvisoryClient,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tradesize-worker".into())
        .spawn(move || worker_loop(client, rx, tx))
}

fn worker_loop(client: AdvisoryClient, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Analyze(request)) => {
                debug!(revision = request.revision, instrument = %request.instrument.id, "worker: analyze");
                let outcome = client.analyze_candle_structure(&request.instrument, &request.candle);
                // The UI may have quit while the call was in flight.
                if tx.send(WorkerResponse::AnalysisDone { revision: request.revision, outcome }).is_err() {
                    break;
                }
            }
        }
    }
    debug!("worker: exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use tradesize_core::domain::{CandleData, Instrument};

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(AdvisoryClient::disabled(), cmd_rx, resp_tx).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn worker_exits_when_sender_dropped() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(AdvisoryClient::disabled(), cmd_rx, resp_tx).unwrap();
        drop(cmd_tx);
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn analyze_echoes_revision() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let handle = spawn_worker(AdvisoryClient::disabled(), cmd_rx, resp_tx).unwrap();
        cmd_tx
            .send(WorkerCommand::Analyze(AdvisoryRequest {
                revision: 7,
                instrument: Instrument::new("eth", "ETH Futures", 0.01),
                candle: CandleData::default(),
            }))
            .unwrap();

        let WorkerResponse::AnalysisDone { revision, outcome } =
            resp_rx.recv_timeout(Duration::from_secs(5)).expect("response");
        assert_eq!(revision, 7);
        assert!(outcome.is_absent());

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
