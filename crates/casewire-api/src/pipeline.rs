//! Request/response pipeline between the interaction side and the worker.
//!
//! Two single-direction unbounded channels plus a shared
//! [`CancellationToken`]: the interaction side submits [`CallRequest`]s and
//! polls for [`CallOutcome`]s without ever blocking; the worker owns the
//! other ends. Outcome order is not related to submission order — callers
//! correlate by [`CallId`].

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::call::{CallId, CallKind, CallOutcome, CallRequest};

/// The interaction side's end of the pipeline.
#[derive(Debug)]
pub struct ServiceHandle {
    requests: mpsc::UnboundedSender<CallRequest>,
    outcomes: mpsc::UnboundedReceiver<CallOutcome>,
    cancel: CancellationToken,
    next_id: CallId,
}

/// The worker's end of the pipeline, consumed by
/// [`run_worker`](crate::worker::run_worker).
#[derive(Debug)]
pub struct WorkerChannels {
    pub(crate) requests: mpsc::UnboundedReceiver<CallRequest>,
    pub(crate) outcomes: mpsc::UnboundedSender<CallOutcome>,
    pub(crate) cancel: CancellationToken,
}

/// Create a connected handle/worker pair.
pub fn pipeline() -> (ServiceHandle, WorkerChannels) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();

    let handle = ServiceHandle {
        requests: request_tx,
        outcomes: outcome_rx,
        cancel: cancel.clone(),
        next_id: 1,
    };
    let channels = WorkerChannels {
        requests: request_rx,
        outcomes: outcome_tx,
        cancel,
    };
    (handle, channels)
}

impl ServiceHandle {
    /// Submit a call for execution, returning its correlation id.
    pub fn submit(&mut self, kind: CallKind, access_token: Option<String>) -> CallId {
        let id = self.next_id;
        self.next_id += 1;

        debug!(id, ?kind, "call submitted");
        let request = CallRequest {
            id,
            kind,
            access_token,
        };
        if self.requests.send(request).is_err() {
            // Worker already gone; the outcome for this id will never arrive.
            warn!(id, "request submitted after worker exit");
        }
        id
    }

    /// Take one delivered outcome if any is available. Never suspends.
    pub fn try_take(&mut self) -> Option<CallOutcome> {
        self.outcomes.try_recv().ok()
    }

    /// Signal cooperative shutdown to the worker. Idempotent; an in-flight
    /// call still runs to completion.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
