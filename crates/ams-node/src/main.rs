//! # AMS Node
//!
//! Hosts the asset management contract over stdin/stdout.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from environment
//! 2. Initialize logging (stderr)
//! 3. Wire world state, event bus and contract service
//! 4. Replay the seed file, if configured
//! 5. Serve one JSON invocation per stdin line until EOF or Ctrl+C
//!
//! ```text
//! $ echo '{"caller":"alice","function":"CreateAsset","args":{"id":"a1","name":"P"}}' | ams-node
//! {"ok":true,"txId":"…","result":{"id":"a1",…}}
//! ```

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;

use ams_node::{NodeConfig, NodeRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env();
    ams_telemetry::init_telemetry(&config.telemetry).context("failed to initialize logging")?;

    let runtime = NodeRuntime::new(config);
    let logger = runtime.start().await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    tokio::select! {
        served = runtime.serve(stdin, stdout) => {
            let served = served?;
            info!(served, "Input exhausted");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("Interrupted");
        }
    }

    runtime.shutdown().await;
    logger.await.context("event logger panicked")?;
    Ok(())
}
