//! Ctrl-C handling
//!
//! The first interrupt cancels monitoring so the schedule is still retired.
//! A second one exits at once, for when retirement itself is stuck.

use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

/// Exit status used when the run is abandoned by a second interrupt
pub const FORCED_EXIT_CODE: i32 = 130;

/// Installs the process-wide Ctrl-C handler
pub fn spawn_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match wait_for_forced_exit(tokio::signal::ctrl_c, cancel).await {
            Ok(()) => {
                error!("Second interrupt received, exiting without retiring the schedule");
                std::process::exit(FORCED_EXIT_CODE);
            }
            Err(e) => warn!("Failed to listen for interrupt: {}", e),
        }
    });
}

/// Cancels `cancel` on the first interrupt and returns on the second
async fn wait_for_forced_exit<F, Fut>(mut interrupt: F, cancel: CancellationToken) -> std::io::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    interrupt().await?;
    warn!("Interrupt received, retiring schedule (interrupt again to exit immediately)");
    cancel.cancel();

    interrupt().await
}
