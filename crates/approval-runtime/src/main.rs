//! # Approval Runtime
//!
//! Background process that holds approval requests until the interactive
//! surface accepts or rejects them.
//!
//! Reads protocol requests from stdin and writes responses plus mirror
//! events to stdout; logs go to stderr. Runs until stdin closes or Ctrl+C.

use std::sync::Arc;
use std::time::Duration;

use ag_02_surface_arbiter::InMemoryWindowHost;
use anyhow::Result;
use approval_runtime::telemetry::init_tracing;
use approval_runtime::{forward_mirror, write_lines, ApprovalContainer, RuntimeConfig, StdioHandler};
use shared_bus::EventFilter;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, warn};

const OUTPUT_DRAIN: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    init_tracing(&config.log)?;
    config.validate()?;

    info!(version = env!("CARGO_PKG_VERSION"), "Approval runtime starting (stdio JSON)");

    // No window manager is reachable from a headless process.
    let host = Arc::new(InMemoryWindowHost::new());
    let container = ApprovalContainer::new(config, host);

    let (out, lines) = mpsc::channel(container.config.output_buffer);
    let writer = tokio::spawn(write_lines(lines, tokio::io::stdout()));
    let mirror = tokio::spawn(forward_mirror(
        container.mirror_bus.event_stream(EventFilter::all()),
        out.clone(),
    ));
    let handler = StdioHandler::new(container.requests.clone(), out);

    tokio::select! {
        served = handler.serve(BufReader::new(tokio::io::stdin())) => served?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Interrupted");
        }
    }

    // Unresolved waiters still get their answer written before exit. The
    // shutdown drops the mirror bus, so forwarding ends after the last
    // snapshot instead of being cut off.
    drop(handler);
    container.shutdown().await;

    let drained = tokio::time::timeout(OUTPUT_DRAIN, async {
        if let Err(e) = mirror.await {
            warn!(error = %e, "Mirror forwarding failed");
        }
        writer.await
    })
    .await;

    match drained {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => warn!(error = %e, "Output closed early"),
        Ok(Err(e)) => warn!(error = %e, "Writer task failed"),
        Err(_) => warn!("Timed out draining output"),
    }

    info!("Approval runtime stopped");
    Ok(())
}
