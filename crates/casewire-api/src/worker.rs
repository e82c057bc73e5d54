//! The worker task: drains the request channel, executes each call through
//! the [`Transport`] seam, and publishes outcomes.

use tracing::debug;

use crate::pipeline::WorkerChannels;
use crate::transport::Transport;

/// Run the worker until shutdown is signalled or the handle is dropped.
///
/// The shutdown signal is re-checked before every dequeue (and wins ties,
/// so teardown is bounded by at most one in-flight call), but an executing
/// call is never interrupted — its outcome is still delivered if the
/// handle is around to take it.
pub async fn run_worker<T: Transport>(mut channels: WorkerChannels, transport: T) {
    loop {
        let request = tokio::select! {
            biased;
            () = channels.cancel.cancelled() => {
                debug!("shutdown signalled, worker exiting");
                break;
            }
            request = channels.requests.recv() => match request {
                Some(request) => request,
                None => {
                    debug!("request channel closed, worker exiting");
                    break;
                }
            },
        };

        debug!(id = request.id, "executing call");
        let outcome = transport.execute(&request).await;
        if channels.outcomes.send(outcome).is_err() {
            debug!("outcome channel closed, worker exiting");
            break;
        }
    }
}
