//! Fetch lifecycle controller.
//!
//! Owns the load generation counter, spawns gateway calls, and emits events
//! for presentation layers.

use crate::api::ApiClient;
use crate::cli::{build_config, Cli};
use crate::model::DataEvent;
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers to drive the data flows.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Re-trigger the record load. The only recovery path after a failed load.
    Reload,
    /// Trigger the server-side CSV export. Re-triggerable any number of times.
    Export,
    Quit,
}

/// Spawn one load attempt. The completion event carries the generation so a
/// superseded load is discarded at the view instead of cancelled in flight.
fn start_load(client: &ApiClient, event_tx: &UnboundedSender<DataEvent>, generation: &mut u64) {
    *generation += 1;
    let generation = *generation;
    let _ = event_tx.send(DataEvent::LoadStarted { generation });
    let client = client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = client.fetch_florida_landfalls().await;
        let _ = tx.send(DataEvent::LoadFinished { generation, result });
    });
}

fn start_export(client: &ApiClient, event_tx: &UnboundedSender<DataEvent>) {
    let _ = event_tx.send(DataEvent::ExportStarted);
    let client = client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = client.request_csv_export().await;
        let _ = tx.send(DataEvent::ExportFinished { result });
    });
}

/// Drive fetches from UI commands and emit events back to presentation
/// layers. One load starts immediately; everything after that is
/// command-driven. Returns when the UI sends Quit or drops its sender.
pub async fn run_controller(
    args: &Cli,
    event_tx: UnboundedSender<DataEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let client = ApiClient::new(&build_config(args))?;
    let mut generation: u64 = 0;

    start_load(&client, &event_tx, &mut generation);

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UiCommand::Reload => start_load(&client, &event_tx, &mut generation),
            UiCommand::Export => start_export(&client, &event_tx),
            UiCommand::Quit => break,
        }
    }

    Ok(())
}
