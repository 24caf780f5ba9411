//! Operation watch loop for skyport.
//!
//! Every mutating command (deploy, stop, redeploy, delete) goes through the
//! same two steps around the actual request:
//!
//! 1. **Preflight**: the owning environment must be in a terminal state. The
//!    control plane does not queue overlapping transitions, so a request made
//!    while another operation is in flight is refused locally.
//! 2. **Watch** (opt-in): poll the target's status at a fixed interval until it
//!    reaches a terminal state, a fetch fails, or the optional deadline passes.
//!
//! ## Outcomes
//!
//! | Observation                    | State       | Result                               |
//! |--------------------------------|-------------|--------------------------------------|
//! | success code of the action     | `Succeeded` | `Ok(WatchReport)`                    |
//! | any other success code         | `Polling`   | keep polling                         |
//! | failure code or `CANCELED`     | `Failed`    | `Err(WatchError::RemoteFailure)`     |
//! | resource vanished              | `Failed`    | `Err(WatchError::NotFoundDuringWatch)` |
//! | fetch error                    | `Errored`   | `Err(WatchError::Transport)`         |
//! | deadline passed                | `Errored`   | `Err(WatchError::TimedOut)`          |
//!
//! Fetch errors are never retried: a stale token would otherwise loop forever.

pub mod classifier;
pub mod error;
pub mod mocks;
pub mod preflight;
pub mod reporter;
pub mod session;
pub mod source;
pub mod watcher;

pub use classifier::{classify, classify_for, Classification};
pub use error::WatchError;
pub use mocks::{MockStatusSource, RecordingReporter, Reported};
pub use preflight::PreflightGate;
pub use reporter::{SilentReporter, WatchReporter};
pub use session::WatchSession;
pub use source::{SourceError, StatusSource};
pub use watcher::{OperationWatcher, WatchConfig, WatchReport, WatchState};
