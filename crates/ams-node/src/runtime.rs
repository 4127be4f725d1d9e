//! # Node Runtime
//!
//! ```text
//! stdin ──line──► ContractService::invoke_json ──► stdout (one response per line)
//!                        │
//!                        ▼ after commit
//!                 BroadcastEventBus ──► event logger task
//! ```

use std::sync::Arc;

use ams_contract::adapters::{BroadcastEventBus, InMemoryWorldState};
use ams_contract::{ContractEvent, ContractService, InvocationResponse, ServiceStats};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::NodeConfig;

/// Contract service wired to the in-memory adapters.
pub type LocalService = ContractService<InMemoryWorldState, BroadcastEventBus>;

/// The local node: one contract service plus its event logger.
pub struct NodeRuntime {
    config: NodeConfig,
    service: Arc<LocalService>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Self {
        let state = Arc::new(InMemoryWorldState::new());
        let events = Arc::new(BroadcastEventBus::with_capacity(
            config.service.event_channel_capacity,
        ));
        let service = Arc::new(ContractService::new(config.service.clone(), state, events));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            service,
            shutdown_tx,
            shutdown_rx,
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<LocalService> {
        Arc::clone(&self.service)
    }

    /// Start the event logger and replay the seed file, if any.
    pub async fn start(&self) -> Result<JoinHandle<()>> {
        info!("===========================================");
        info!("  AMS Node v{}", ams_contract::VERSION);
        info!("===========================================");

        let logger = self.spawn_event_logger();

        if let Some(path) = &self.config.seed_file {
            let contents = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read seed file {}", path.display()))?;
            let mut applied = 0usize;
            for (index, line) in contents.lines().enumerate() {
                let Some(response) = self.handle_line(line) else {
                    continue;
                };
                if response.ok {
                    applied += 1;
                } else {
                    warn!(line = index + 1, error = ?response.error, "Seed invocation failed");
                }
            }
            info!(path = %path.display(), applied, "Seed file replayed");
        }

        Ok(logger)
    }

    fn spawn_event_logger(&self) -> JoinHandle<()> {
        let mut events = self.service.events().subscribe();
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    received = events.recv() => match received {
                        Ok(event) => log_event(&event),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Event logger lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = shutdown.changed() => {
                        info!("[events] Shutdown signal received");
                        break;
                    }
                }
            }
        })
    }

    /// Handle one input line. Blank lines produce no response.
    pub fn handle_line(&self, line: &str) -> Option<InvocationResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let _span = ams_telemetry::component_span!("invocation", component = "node").entered();
        Some(self.service.invoke_json(line))
    }

    /// Serve invocations from `reader` until end of input.
    ///
    /// Returns the number of responses written.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut served = 0usize;
        while let Some(line) = lines.next_line().await.context("failed to read input")? {
            let Some(response) = self.handle_line(&line) else {
                continue;
            };
            let mut encoded =
                serde_json::to_vec(&response).context("failed to encode response")?;
            encoded.push(b'\n');
            writer
                .write_all(&encoded)
                .await
                .context("failed to write response")?;
            writer.flush().await.context("failed to flush output")?;
            served += 1;
        }
        debug!(served, "Input closed");
        Ok(served)
    }

    /// Stop background tasks and report final counters.
    pub async fn shutdown(&self) -> ServiceStats {
        info!("Initiating graceful shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let stats = self.service.stats();
        info!(
            invocations = stats.invocations,
            committed = stats.committed,
            rejected = stats.rejected,
            conflicts = stats.conflicts,
            events = stats.events_emitted,
            "Shutdown complete"
        );
        stats
    }
}

fn log_event(event: &ContractEvent) {
    info!(
        event = %event.name,
        tx_id = %event.tx_id,
        bytes = event.payload.len(),
        "Event committed"
    );
}
