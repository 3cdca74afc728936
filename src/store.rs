//! Observable navigation state source.
//!
//! The router does not decide when routes change; it reacts to committed
//! navigation state. [`StateSubscriber`] is the seam: anything that commits a
//! [`NavigationState`] calls [`new_state`](StateSubscriber::new_state) on its
//! subscribers, and [`Router`](crate::Router) is one.
//!
//! [`NavigationStore`] is a minimal container for that seam. It reduces
//! [`NavigationAction`]s with [`reduce_navigation`] and publishes every
//! committed state, in commit order, to its subscribers. A new subscriber
//! immediately receives the current state.
//!
//! # Example
//!
//! ```
//! use route_reconciler::{subscriber_fn, NavigationAction, NavigationStore, Route};
//! use std::sync::{Arc, Mutex};
//!
//! let store = NavigationStore::default();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! store.subscribe(Arc::new(subscriber_fn(move |state| {
//!     sink.lock().unwrap().push(state.route.segment_count());
//! })));
//!
//! store.dispatch(&NavigationAction::set_route(Route::from_ids(["a", "b"])));
//! assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
//! ```

use crate::action::NavigationAction;
use crate::state::{reduce_navigation, NavigationState};
use crate::trace_log;
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// StateSubscriber trait
// ============================================================================

/// Receiver of committed navigation state.
pub trait StateSubscriber: Send + Sync + 'static {
    /// Called with every committed state, in commit order.
    fn new_state(&self, state: &NavigationState);
}

/// Create a subscriber from a closure.
pub const fn subscriber_fn<F>(f: F) -> FnSubscriber<F>
where
    F: Fn(&NavigationState) + Send + Sync + 'static,
{
    FnSubscriber { f }
}

/// Subscriber created from a closure via [`subscriber_fn`].
pub struct FnSubscriber<F> {
    f: F,
}

impl<F> StateSubscriber for FnSubscriber<F>
where
    F: Fn(&NavigationState) + Send + Sync + 'static,
{
    fn new_state(&self, state: &NavigationState) {
        (self.f)(state);
    }
}

// ============================================================================
// NavigationStore
// ============================================================================

/// Identifies a subscription for [`NavigationStore::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Holds a [`NavigationState`] and publishes every change.
pub struct NavigationStore {
    state: Mutex<NavigationState>,
    subscribers: Mutex<Vec<(SubscriptionId, Arc<dyn StateSubscriber>)>>,
    next_id: AtomicUsize,
    // Serializes dispatch so subscribers observe states in commit order.
    // Reentrant so a subscriber may dispatch while being notified.
    dispatch_lock: ReentrantMutex<()>,
}

impl NavigationStore {
    /// Create a store holding `state`.
    pub fn new(state: NavigationState) -> Self {
        Self {
            state: Mutex::new(state),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(0),
            dispatch_lock: ReentrantMutex::new(()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> NavigationState {
        self.state.lock().clone()
    }

    /// Reduce `action` into the state and notify every subscriber.
    pub fn dispatch(&self, action: &NavigationAction) {
        let _ordered = self.dispatch_lock.lock();
        let committed = {
            let mut state = self.state.lock();
            let next = reduce_navigation(state.clone(), action);
            *state = next.clone();
            next
        };
        trace_log!("Dispatched {:?}; committed {}", action, committed.route);
        self.publish(&committed);
    }

    /// Register `subscriber` and deliver the current state to it right away.
    pub fn subscribe(&self, subscriber: Arc<dyn StateSubscriber>) -> SubscriptionId {
        let _ordered = self.dispatch_lock.lock();
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers.lock().push((id, subscriber.clone()));
        subscriber.new_state(&self.state());
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn publish(&self, state: &NavigationState) {
        let subscribers: Vec<Arc<dyn StateSubscriber>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber.new_state(state);
        }
    }
}

impl Default for NavigationStore {
    fn default() -> Self {
        Self::new(NavigationState::new())
    }
}

impl std::fmt::Debug for NavigationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationStore")
            .field("route", &self.state.lock().route)
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}
