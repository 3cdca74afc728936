//! Error and diagnostic types for the router.
//!
//! - [`RouterError`]: returned by the [`Router`](crate::Router) control
//!   surface (construction, enqueueing, waiting, shutdown). The diff algorithm
//!   and the handlers never produce errors.
//! - [`StuckNavigation`]: diagnostic record handed to the stuck-navigation
//!   hook when a handler does not signal completion. It is reported, never
//!   returned: the router keeps going.
//!
//! # Examples
//!
//! ```
//! use route_reconciler::RouterError;
//!
//! let error = RouterError::WorkerStopped;
//! assert_eq!(error.to_string(), "Router worker has stopped");
//! ```

use crate::diff::RoutingOperation;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// RouterError
// ============================================================================

/// Failures of the router's control surface.
#[derive(Debug)]
pub enum RouterError {
    /// The serial worker thread could not be spawned.
    WorkerSpawn(std::io::Error),

    /// The worker is no longer running; the command was not delivered.
    WorkerStopped,

    /// The worker did not become idle within the given time.
    IdleTimeout { waited: Duration },

    /// The worker thread terminated by panicking.
    WorkerPanicked,
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::WorkerSpawn(err) => {
                write!(f, "Failed to spawn router worker: {}", err)
            }
            RouterError::WorkerStopped => f.write_str("Router worker has stopped"),
            RouterError::IdleTimeout { waited } => {
                write!(f, "Router worker still busy after {:?}", waited)
            }
            RouterError::WorkerPanicked => f.write_str("Router worker panicked"),
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::WorkerSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl RouterError {
    /// Check if the worker is gone (stopped or panicked).
    pub fn is_worker_gone(&self) -> bool {
        matches!(self, RouterError::WorkerStopped | RouterError::WorkerPanicked)
    }
}

// ============================================================================
// Stuck navigation diagnostics
// ============================================================================

/// Why an operation was given up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StuckReason {
    /// The handler did not complete within the configured timeout.
    TimedOut,
    /// The handler dropped its [`Completion`](crate::Completion) without completing.
    CompletionDropped,
}

impl fmt::Display for StuckReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StuckReason::TimedOut => f.write_str("completion timed out"),
            StuckReason::CompletionDropped => f.write_str("completion dropped"),
        }
    }
}

/// A routing operation whose handler never signalled completion.
#[derive(Debug, Clone)]
pub struct StuckNavigation {
    /// The operation that was dispatched.
    pub operation: RoutingOperation,
    /// Name of the handler it was dispatched to.
    pub handler: &'static str,
    /// How long the worker waited before moving on.
    pub waited: Duration,
    /// Why the worker moved on.
    pub reason: StuckReason,
}

impl fmt::Display for StuckNavigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on handler '{}' ({} after {:?})",
            self.operation, self.handler, self.reason, self.waited
        )
    }
}

/// Hook invoked for every stuck operation.
pub type StuckHandler = Arc<dyn Fn(&StuckNavigation) + Send + Sync>;

/// Breakpoint marker called on every stuck navigation.
///
/// Does nothing by itself. Set a breakpoint on
/// `route_reconciler::error::navigation_stuck` to halt when the router gives
/// up waiting on a handler.
#[inline(never)]
pub fn navigation_stuck(diagnostic: &StuckNavigation) {
    std::hint::black_box(diagnostic);
}

// ============================================================================
// Tests
// ============================================================================
