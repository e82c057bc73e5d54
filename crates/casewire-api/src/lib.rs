//! Asynchronous request pipeline and HTTP transport for the case service.
//!
//! The interaction side of the explorer stays synchronous and single
//! threaded; all networking happens on a worker task. The two meet at the
//! [`pipeline`]: submit a [`CallKind`], poll [`ServiceHandle::try_take`]
//! each frame, correlate by [`CallId`]. The worker executes calls through
//! the [`Transport`] seam, which [`HttpTransport`] implements against a
//! configured service.

pub mod call;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod transport;
pub mod worker;

pub use call::{CallId, CallKind, CallOutcome, CallRequest};
pub use config::SessionConfig;
pub use error::ApiError;
pub use pipeline::{ServiceHandle, WorkerChannels, pipeline};
pub use transport::{HttpTransport, Transport, parse_access_token};
pub use worker::run_worker;
