//! The execution engine.
//!
//! [`Router`] owns a chain of [`NavigationHandler`]s and a dedicated serial
//! worker thread. Every committed route is sent to that worker, which diffs it
//! against the last applied route and drives the chain through the resulting
//! operations, one at a time.
//!
//! # Pipeline
//!
//! ```text
//! any thread                      worker thread ("route-reconciler")
//! ──────────                      ───────────────────────────────────
//! navigate(route) ──► channel ──► diff(last, route)
//!                                 for op in operations:
//!                                     chain[op.handler_index].push/pop/replace
//!                                     update chain
//!                                     wait for Completion (≤ completion_timeout)
//!                                 last = route
//! ```
//!
//! # Guarantees
//!
//! - **Single flight**: only the worker touches the chain, and it handles one
//!   command at a time, so at most one transition is in progress. A route
//!   committed while another transition runs is queued behind it.
//! - **Ordering**: operation *n + 1* is dispatched only after operation *n*
//!   signalled completion or timed out.
//! - **Forward progress**: a handler that never completes stalls the worker
//!   for `completion_timeout` per operation, whether it holds on to its
//!   [`Completion`] or drops it. The stuck-navigation diagnostic fires and
//!   the next operation runs. A panicking `on_stuck` hook is logged and
//!   ignored. The chain is updated as soon as the handler call returns, so a
//!   timed-out operation still counts as applied; there is no rollback.
//! - **Fail fast**: a handler panicking (including the unsupported-operation
//!   defaults) aborts the process.
//!
//! # Example
//!
//! ```
//! use route_reconciler::{ImmediateHandler, Route, Router, RouterConfig};
//! use std::time::Duration;
//!
//! let router = Router::new(ImmediateHandler::new(), RouterConfig::default())?;
//! router.navigate(Route::from_ids(["tabs", "inbox"]), true)?;
//!
//! let snapshot = router.wait_idle(Duration::from_secs(1))?;
//! assert_eq!(snapshot.chain_depth, 3);
//! router.shutdown()?;
//! # Ok::<(), route_reconciler::RouterError>(())
//! ```

use crate::diff::{diff, RoutingOperation};
use crate::error::{navigation_stuck, RouterError, StuckHandler, StuckNavigation, StuckReason};
use crate::handler::{BoxedHandler, Completion, NavigationHandler};
use crate::route::Route;
use crate::state::NavigationState;
use crate::store::{NavigationStore, StateSubscriber, SubscriptionId};
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long the worker waits for a handler to complete an operation.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(3);

/// Default name of the worker thread.
pub const DEFAULT_WORKER_NAME: &str = "route-reconciler";

// ============================================================================
// RouterConfig
// ============================================================================

/// Router configuration.
///
/// # Example
///
/// ```
/// use route_reconciler::RouterConfig;
/// use std::time::Duration;
///
/// let config = RouterConfig::new()
///     .completion_timeout(Duration::from_millis(500))
///     .worker_name("main-navigation")
///     .on_stuck(|stuck| eprintln!("stuck: {stuck}"));
/// assert_eq!(config.completion_timeout, Duration::from_millis(500));
/// ```
#[derive(Clone)]
pub struct RouterConfig {
    /// Upper bound on the wait for each operation's completion.
    pub completion_timeout: Duration,
    /// Name given to the worker thread.
    pub worker_name: String,
    /// Hook called for every stuck operation, after the warning is logged.
    pub on_stuck: Option<StuckHandler>,
}

impl RouterConfig {
    /// Default configuration: 3 second timeout, no stuck hook.
    pub fn new() -> Self {
        Self {
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            worker_name: DEFAULT_WORKER_NAME.to_string(),
            on_stuck: None,
        }
    }

    /// Set the per-operation completion timeout.
    pub fn completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    /// Set the worker thread name.
    pub fn worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    /// Set the stuck-navigation hook.
    pub fn on_stuck<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StuckNavigation) + Send + Sync + 'static,
    {
        self.on_stuck = Some(Arc::new(hook));
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("completion_timeout", &self.completion_timeout)
            .field("worker_name", &self.worker_name)
            .field("on_stuck", &self.on_stuck.is_some())
            .finish()
    }
}

// ============================================================================
// RouterSnapshot
// ============================================================================

/// Worker state observed by [`Router::wait_idle`].
#[derive(Debug, Clone)]
pub struct RouterSnapshot {
    /// Last route the worker applied.
    pub route: Route,
    /// Number of handlers in the chain, root included.
    pub chain_depth: usize,
    /// Handler names, root first.
    pub handler_names: Vec<&'static str>,
    /// Transitions that produced at least one operation.
    pub transitions: u64,
    /// Operations dispatched to handlers.
    pub operations: u64,
    /// Operations that timed out or whose completion was dropped.
    pub stuck_operations: u64,
}

// ============================================================================
// Router
// ============================================================================

enum Command {
    Navigate { route: Route, animated: bool },
    Flush(Sender<RouterSnapshot>),
    Shutdown,
}

/// Reconciles committed routes against a chain of navigation handlers.
///
/// One router per navigation root. Cheap to share behind an [`Arc`]; every
/// method may be called from any thread.
pub struct Router {
    tx: Sender<Command>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Router {
    /// Start a router whose chain begins with `root`.
    ///
    /// The chain starts as `[root]` with an empty applied route; nothing is
    /// asked of `root` until a non-empty route arrives.
    pub fn new(root: impl NavigationHandler, config: RouterConfig) -> Result<Self, RouterError> {
        let (tx, rx) = channel::unbounded();
        let name = config.worker_name.clone();
        let worker = NavigationWorker::new(Box::new(root), config);
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker.run(rx))
            .map_err(RouterError::WorkerSpawn)?;
        info_log!("Router worker '{}' started", name);
        Ok(Self {
            tx,
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Start a router with the default configuration.
    pub fn with_root(root: impl NavigationHandler) -> Result<Self, RouterError> {
        Self::new(root, RouterConfig::default())
    }

    /// Start a router and subscribe it to `store`.
    ///
    /// The store delivers its current state immediately, so a route already
    /// present in the store is presented right away. Pass the returned
    /// [`SubscriptionId`] to [`NavigationStore::unsubscribe`] to detach the
    /// router again.
    pub fn attach(
        store: &NavigationStore,
        root: impl NavigationHandler,
        config: RouterConfig,
    ) -> Result<(Arc<Self>, SubscriptionId), RouterError> {
        let router = Arc::new(Self::new(root, config)?);
        let subscription = store.subscribe(router.clone());
        Ok((router, subscription))
    }

    /// Queue a transition to `route`.
    ///
    /// Returns once the request is queued; the transition itself runs on the
    /// worker after everything queued before it.
    pub fn navigate(&self, route: Route, animated: bool) -> Result<(), RouterError> {
        trace_log!("Queueing navigation to {}", route);
        self.tx
            .send(Command::Navigate { route, animated })
            .map_err(|_| RouterError::WorkerStopped)
    }

    /// Wait until every transition queued so far has been applied.
    pub fn wait_idle(&self, timeout: Duration) -> Result<RouterSnapshot, RouterError> {
        let (reply_tx, reply_rx) = channel::bounded(1);
        self.tx
            .send(Command::Flush(reply_tx))
            .map_err(|_| RouterError::WorkerStopped)?;
        match reply_rx.recv_timeout(timeout) {
            Ok(snapshot) => Ok(snapshot),
            Err(RecvTimeoutError::Timeout) => Err(RouterError::IdleTimeout { waited: timeout }),
            Err(RecvTimeoutError::Disconnected) => Err(RouterError::WorkerStopped),
        }
    }

    /// Stop the worker after the queued transitions and wait for it to exit.
    ///
    /// Calling this from inside a handler does not wait, since the worker
    /// cannot join itself.
    pub fn shutdown(&self) -> Result<(), RouterError> {
        let _ = self.tx.send(Command::Shutdown);
        let Some(handle) = self.worker.lock().take() else {
            return Ok(());
        };
        if handle.thread().id() == thread::current().id() {
            warn_log!("Router shutdown requested from its own worker; not joining");
            return Ok(());
        }
        handle.join().map_err(|_| RouterError::WorkerPanicked)?;
        info_log!("Router worker stopped");
        Ok(())
    }

    /// Whether the worker thread is still alive.
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl StateSubscriber for Router {
    fn new_state(&self, state: &NavigationState) {
        if let Err(err) = self.navigate(state.route.clone(), state.animated) {
            warn_log!("Dropping navigation to {}: {}", state.route, err);
        }
    }
}

impl Drop for Router {
    fn drop(&mut self) {
        // Let the worker drain and exit on its own; joining here could block
        // for up to one completion timeout per queued operation.
        let _ = self.tx.send(Command::Shutdown);
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("running", &self.is_running())
            .field("queued", &self.tx.len())
            .finish()
    }
}

// ============================================================================
// NavigationWorker
// ============================================================================

/// State owned by the worker thread. Never shared.
struct NavigationWorker {
    chain: Vec<BoxedHandler>,
    route: Route,
    config: RouterConfig,
    transitions: u64,
    operations: u64,
    stuck_operations: u64,
}

impl NavigationWorker {
    fn new(root: BoxedHandler, config: RouterConfig) -> Self {
        Self {
            chain: vec![root],
            route: Route::empty(),
            config,
            transitions: 0,
            operations: 0,
            stuck_operations: 0,
        }
    }

    fn run(mut self, rx: Receiver<Command>) {
        while let Ok(command) = rx.recv() {
            match command {
                Command::Navigate { route, animated } => self.transition(route, animated),
                Command::Flush(reply) => {
                    let _ = reply.send(self.snapshot());
                }
                Command::Shutdown => break,
            }
        }
        debug_log!(
            "Router worker exiting after {} transitions ({} stuck operations)",
            self.transitions,
            self.stuck_operations
        );
    }

    fn transition(&mut self, route: Route, animated: bool) {
        let operations = diff(&self.route, &route);
        if operations.is_empty() {
            trace_log!("Route unchanged ({}); nothing to do", route);
            self.route = route;
            return;
        }

        info_log!(
            "Transition {:?} → {:?}: {} operation(s), animated={}",
            self.route,
            route,
            operations.len(),
            animated
        );
        for operation in operations {
            self.apply(operation, animated);
        }
        self.route = route;
        self.transitions += 1;

        if self.chain.len() != self.route.segment_count() + 1 {
            error_log!(
                "Handler chain depth {} does not match route depth {} after transition",
                self.chain.len(),
                self.route.segment_count()
            );
        }
    }

    fn apply(&mut self, operation: RoutingOperation, animated: bool) {
        let index = operation.handler_index();
        let Some(handler) = self.chain.get_mut(index) else {
            error_log!(
                "No handler at index {} for {} (chain depth {}); skipping",
                index,
                operation,
                self.chain.len()
            );
            return;
        };
        let name = handler.name();
        debug_log!("Dispatching {} to handler '{}'", operation, name);

        let (completion, done) = Completion::pair();
        match &operation {
            RoutingOperation::Pop { segment, .. } => {
                guarded(name, &operation, || handler.pop(segment, animated, completion));
                if index + 1 < self.chain.len() {
                    self.chain.remove(index + 1);
                } else {
                    error_log!("Popped {} but handler {} has no child", segment, index);
                }
            }
            RoutingOperation::Replace { from, to, .. } => {
                let next = guarded(name, &operation, || {
                    handler.replace(from, to, animated, completion)
                });
                match self.chain.get_mut(index + 1) {
                    Some(slot) => *slot = next,
                    None => self.chain.push(next),
                }
            }
            RoutingOperation::Push { segment, .. } => {
                let next = guarded(name, &operation, || {
                    handler.push(segment, animated, completion)
                });
                self.chain.push(next);
            }
        }
        self.operations += 1;

        self.await_completion(operation, name, &done);
    }

    fn await_completion(
        &mut self,
        operation: RoutingOperation,
        handler: &'static str,
        done: &Receiver<()>,
    ) {
        let started = Instant::now();
        let timeout = self.config.completion_timeout;
        match done.recv_timeout(timeout) {
            Ok(()) => {
                trace_log!("{} completed after {:?}", operation, started.elapsed());
            }
            Err(RecvTimeoutError::Timeout) => {
                self.report_stuck(StuckNavigation {
                    operation,
                    handler,
                    waited: timeout,
                    reason: StuckReason::TimedOut,
                });
            }
            Err(RecvTimeoutError::Disconnected) => {
                // The transition may still be on screen; hold the worker for
                // the full timeout before the next operation.
                thread::sleep(timeout.saturating_sub(started.elapsed()));
                self.report_stuck(StuckNavigation {
                    operation,
                    handler,
                    waited: started.elapsed(),
                    reason: StuckReason::CompletionDropped,
                });
            }
        }
    }

    fn report_stuck(&mut self, diagnostic: StuckNavigation) {
        self.stuck_operations += 1;
        warn_log!(
            "Router is stuck waiting for a completion: {}. Every handler must call \
             `Completion::complete`; break on `navigation_stuck` to halt here.",
            diagnostic
        );
        navigation_stuck(&diagnostic);
        if let Some(hook) = &self.config.on_stuck {
            if panic::catch_unwind(AssertUnwindSafe(|| hook(&diagnostic))).is_err() {
                error_log!("on_stuck hook panicked while reporting {}; continuing", diagnostic);
            }
        }
    }

    fn snapshot(&self) -> RouterSnapshot {
        RouterSnapshot {
            route: self.route.clone(),
            chain_depth: self.chain.len(),
            handler_names: self.chain.iter().map(|handler| handler.name()).collect(),
            transitions: self.transitions,
            operations: self.operations,
            stuck_operations: self.stuck_operations,
        }
    }
}

/// Run a handler call; a panic inside it is unrecoverable.
fn guarded<T>(handler: &str, operation: &RoutingOperation, call: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(value) => value,
        Err(_) => {
            error_log!(
                "Handler '{}' panicked during {}; the handler chain is no longer consistent, \
                 aborting",
                handler,
                operation
            );
            std::process::abort()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
