//! Navigation state and reducers.
//!
//! Two state slices are provided:
//!
//! - [`NavigationState`]: the current route, whether the next transition
//!   should animate, and per-route data. This is what the
//!   [`Router`](crate::Router) consumes.
//! - [`MultiNavigationState`]: the last full route of each root (for example
//!   each tab of a tab bar), so a root can be restored where the user left it.
//!
//! Both are updated by pure reducer functions that fold a
//! [`NavigationAction`] into a new state value. Actions a reducer does not
//! handle leave its state untouched.

use crate::action::NavigationAction;
use crate::data::RouteDataStore;
use crate::route::{Route, RouteSegment};
use crate::{debug_log, trace_log, warn_log};
use std::any::Any;
use std::collections::HashMap;

// ============================================================================
// NavigationState
// ============================================================================

/// The navigation slice of application state.
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// Route that should currently be presented.
    pub route: Route,
    /// Whether the transition to `route` should animate.
    pub animated: bool,
    /// Payloads keyed by exact route.
    pub route_specific_data: RouteDataStore,
}

impl NavigationState {
    /// Create a state with an empty route.
    pub fn new() -> Self {
        Self {
            route: Route::empty(),
            animated: true,
            route_specific_data: RouteDataStore::per_route(),
        }
    }

    /// Create a state presenting `route`.
    pub fn with_route(route: Route) -> Self {
        Self {
            route,
            ..Self::new()
        }
    }

    /// Payload stored for `route`, downcast to `T`.
    pub fn route_specific_data_as<T: Any>(&self, route: &Route) -> Option<&T> {
        self.route_specific_data.get_as::<T>(route)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold `action` into a navigation state.
pub fn reduce_navigation(state: NavigationState, action: &NavigationAction) -> NavigationState {
    let mut state = state;
    match action {
        NavigationAction::SetRoute { route, animated } => {
            debug_log!("Set route: {} → {}", state.route, route);
            state.route = route.clone();
            state.animated = *animated;
        }
        NavigationAction::PushRouteSegment { segment, animated } => {
            state.route = state.route.appending(segment.clone());
            state.animated = *animated;
            debug_log!("Pushed segment '{}': {}", segment.id, state.route);
        }
        NavigationAction::PopRouteSegment { animated } => {
            if state.route.is_empty() {
                warn_log!("Pop requested on an empty route; ignoring");
            } else {
                state.route = state.route.removing_last();
                state.animated = *animated;
                debug_log!("Popped segment: {}", state.route);
            }
        }
        NavigationAction::ChangeRoute {
            suffix_to_pop,
            suffix_to_push,
            animated,
        } => match change_route(&state.route, suffix_to_pop, suffix_to_push) {
            Some(route) => {
                debug_log!("Changed route: {} → {}", state.route, route);
                state.route = route;
                state.animated = *animated;
            }
            None => {
                warn_log!(
                    "Route {} does not end with {:?}; change ignored",
                    state.route,
                    suffix_to_pop
                );
            }
        },
        NavigationAction::SetRouteSpecificData { route, data } => {
            trace_log!("Route-specific data set for {}", route);
            state.route_specific_data.set_shared(route, data.clone());
        }
        NavigationAction::SetMultiRoute { .. }
        | NavigationAction::SetMultiRouteSpecificData { .. } => {}
    }
    state
}

/// Remove `suffix_to_pop` from the end of `route` and append `suffix_to_push`.
///
/// Returns `None` when `route` does not end with `suffix_to_pop`. The root of
/// `route` is kept.
fn change_route(
    route: &Route,
    suffix_to_pop: &[RouteSegment],
    suffix_to_push: &[RouteSegment],
) -> Option<Route> {
    if !route.path().ends_with(suffix_to_pop) {
        return None;
    }
    let mut changed = route.clone();
    for _ in suffix_to_pop {
        changed = changed.removing_last();
    }
    for segment in suffix_to_push {
        changed = changed.appending(segment.clone());
    }
    Some(changed)
}

// ============================================================================
// MultiNavigationState
// ============================================================================

/// Saved routes per root route.
///
/// Intended for restoring each root (tab, sidebar section, ...) to the route
/// the user last visited under it.
#[derive(Debug, Clone)]
pub struct MultiNavigationState {
    /// Last full route per rendered root.
    pub route_map: HashMap<String, Route>,
    /// Payloads keyed by exact route.
    pub route_specific_data: RouteDataStore,
}

impl MultiNavigationState {
    /// Create an empty multi-navigation state.
    pub fn new() -> Self {
        Self {
            route_map: HashMap::new(),
            route_specific_data: RouteDataStore::per_route(),
        }
    }

    /// Route last remembered for the root of `route`.
    pub fn route_for_root(&self, route: &Route) -> Option<&Route> {
        self.route_map.get(&route.root_string())
    }

    /// Payload stored for `route`, downcast to `T`.
    pub fn route_specific_data_as<T: Any>(&self, route: &Route) -> Option<&T> {
        self.route_specific_data.get_as::<T>(route)
    }
}

impl Default for MultiNavigationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold `action` into a multi-navigation state.
pub fn reduce_multi_navigation(
    state: MultiNavigationState,
    action: &NavigationAction,
) -> MultiNavigationState {
    let mut state = state;
    match action {
        NavigationAction::SetMultiRoute { route, .. } => {
            let key = route.root_string();
            debug_log!("Remembering {} under root '{}'", route, key);
            state.route_map.insert(key, route.clone());
        }
        NavigationAction::SetMultiRouteSpecificData { route, data } => {
            trace_log!("Multi route-specific data set for {}", route);
            state.route_specific_data.set_shared(route, data.clone());
        }
        _ => {}
    }
    state
}
