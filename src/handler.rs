//! Navigation handlers and completion signalling.
//!
//! A [`NavigationHandler`] is the collaborator that actually presents or
//! removes view content for one level of the route. The router keeps one
//! handler per presented level (the *chain*) and addresses every
//! [`RoutingOperation`](crate::RoutingOperation) to exactly one of them.
//!
//! # Completion
//!
//! Each call receives a [`Completion`] token. The handler must call
//! [`Completion::complete`] once its transition has finished, either inline or
//! later from any thread (for example after an animation on a UI thread). The
//! router's worker waits for that signal, bounded by
//! [`RouterConfig::completion_timeout`](method@crate::RouterConfig::completion_timeout),
//! before it dispatches the next operation.
//!
//! # Unsupported operations
//!
//! All three operations have default implementations that **panic**. A handler
//! that silently ignored a request would leave the chain out of sync with what
//! is on screen, so a missing implementation is treated as a programming error.
//! Inside the router this aborts the process.
//!
//! # Example
//!
//! ```
//! use route_reconciler::{
//!     BoxedHandler, Completion, ImmediateHandler, NavigationHandler, RouteSegment,
//! };
//!
//! struct TabBar;
//!
//! impl NavigationHandler for TabBar {
//!     fn replace(
//!         &mut self,
//!         _from: &RouteSegment,
//!         to: &RouteSegment,
//!         _animated: bool,
//!         completion: Completion,
//!     ) -> BoxedHandler {
//!         println!("selecting tab {}", to.id);
//!         completion.complete();
//!         Box::new(ImmediateHandler::new())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "TabBar"
//!     }
//! }
//! ```

use crate::diff::OperationKind;
use crate::error_log;
use crate::route::RouteSegment;
use crossbeam::channel::{self, Receiver, Sender};

/// Owned, type-erased handler as stored in the chain.
pub type BoxedHandler = Box<dyn NavigationHandler>;

// ============================================================================
// Completion
// ============================================================================

/// Single-use signal that a handler has finished an operation.
///
/// Consumed by [`complete`](Self::complete), so it cannot be signalled twice.
/// Dropping it without completing counts as never completing: the router
/// waits out the full timeout, then reports a stuck navigation.
#[derive(Debug)]
pub struct Completion {
    tx: Sender<()>,
}

impl Completion {
    /// Create a completion token and the receiver the router waits on.
    pub(crate) fn pair() -> (Self, Receiver<()>) {
        let (tx, rx) = channel::bounded(1);
        (Self { tx }, rx)
    }

    /// Signal that the operation has finished.
    pub fn complete(self) {
        // The router may have stopped waiting (timeout or shutdown); nothing to do then.
        let _ = self.tx.try_send(());
    }
}

// ============================================================================
// NavigationHandler trait
// ============================================================================

/// Capability interface for presenting one level of a route.
///
/// Handlers are owned by the router's worker thread and only ever called from
/// it, one operation at a time, hence `Send` but not `Sync`.
pub trait NavigationHandler: Send + 'static {
    /// Present `segment` as a child of this handler's content.
    ///
    /// Returns the handler responsible for the pushed content.
    fn push(
        &mut self,
        _segment: &RouteSegment,
        _animated: bool,
        _completion: Completion,
    ) -> BoxedHandler {
        unsupported_operation(self.name(), OperationKind::Push)
    }

    /// Remove the child presenting `segment`.
    fn pop(&mut self, _segment: &RouteSegment, _animated: bool, _completion: Completion) {
        unsupported_operation(self.name(), OperationKind::Pop)
    }

    /// Swap the child presenting `from` for new content presenting `to`.
    ///
    /// Returns the handler responsible for the new content.
    fn replace(
        &mut self,
        _from: &RouteSegment,
        _to: &RouteSegment,
        _animated: bool,
        _completion: Completion,
    ) -> BoxedHandler {
        unsupported_operation(self.name(), OperationKind::Replace)
    }

    /// Handler name for diagnostics.
    fn name(&self) -> &'static str {
        "NavigationHandler"
    }
}

/// Fail fast on an operation the handler does not implement.
#[cold]
#[track_caller]
fn unsupported_operation(handler: &str, kind: OperationKind) -> ! {
    error_log!(
        "Handler '{}' does not implement {}; the presented hierarchy can no longer be trusted",
        handler,
        kind
    );
    panic!("navigation handler '{handler}' cannot {kind}: operation not implemented");
}

// ============================================================================
// ImmediateHandler
// ============================================================================

/// Handler that accepts every operation and completes it immediately.
///
/// Children are fresh `ImmediateHandler`s. Useful for levels that have no
/// visual transition of their own and for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateHandler;

impl ImmediateHandler {
    /// Create a new immediate handler.
    pub const fn new() -> Self {
        Self
    }
}

impl NavigationHandler for ImmediateHandler {
    fn push(
        &mut self,
        _segment: &RouteSegment,
        _animated: bool,
        completion: Completion,
    ) -> BoxedHandler {
        completion.complete();
        Box::new(ImmediateHandler)
    }

    fn pop(&mut self, _segment: &RouteSegment, _animated: bool, completion: Completion) {
        completion.complete();
    }

    fn replace(
        &mut self,
        _from: &RouteSegment,
        _to: &RouteSegment,
        _animated: bool,
        completion: Completion,
    ) -> BoxedHandler {
        completion.complete();
        Box::new(ImmediateHandler)
    }

    fn name(&self) -> &'static str {
        "ImmediateHandler"
    }
}

// ============================================================================
// Tests
// ============================================================================
