//! Navigation intents.
//!
//! [`NavigationAction`] describes *what the application wants* to happen to
//! the current route. Actions are folded into navigation state by the reducers
//! in [`state`](crate::state); the router itself only ever sees the resulting
//! [`Route`].
//!
//! | Action                        | Effect                                         | Default animation |
//! |-------------------------------|------------------------------------------------|-------------------|
//! | `SetRoute`                    | replace the whole route                        | animated          |
//! | `PushRouteSegment`            | append one segment                             | animated          |
//! | `PopRouteSegment`             | remove the last segment                        | animated          |
//! | `ChangeRoute`                 | drop a suffix, then append another             | not animated      |
//! | `SetRouteSpecificData`        | store a payload for a route                    | n/a               |
//! | `SetMultiRoute`               | remember a full route under its root           | animated          |
//! | `SetMultiRouteSpecificData`   | store a payload in the multi-navigation state  | n/a               |
//!
//! # Example
//!
//! ```
//! use route_reconciler::{NavigationAction, Route};
//!
//! let action = NavigationAction::set_route(Route::from_ids(["tabs", "inbox"]));
//! assert!(action.is_animated());
//!
//! let action = NavigationAction::push_segment("message-7").unanimated();
//! assert!(!action.is_animated());
//! ```

use crate::route::{Route, RouteData, RouteSegment};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An intent to change navigation state.
#[derive(Clone)]
pub enum NavigationAction {
    /// Replace the current route.
    SetRoute {
        /// Route to navigate to.
        route: Route,
        /// Whether handlers should animate.
        animated: bool,
    },

    /// Append one segment to the current route.
    PushRouteSegment {
        /// Segment to append.
        segment: RouteSegment,
        /// Whether handlers should animate.
        animated: bool,
    },

    /// Remove the last segment of the current route.
    PopRouteSegment {
        /// Whether handlers should animate.
        animated: bool,
    },

    /// Drop `suffix_to_pop` from the end of the route, then append `suffix_to_push`.
    ChangeRoute {
        /// Trailing segments to remove.
        suffix_to_pop: Vec<RouteSegment>,
        /// Segments to append afterwards.
        suffix_to_push: Vec<RouteSegment>,
        /// Whether handlers should animate.
        animated: bool,
    },

    /// Store a payload for a route in the navigation state.
    SetRouteSpecificData {
        /// Route the payload belongs to.
        route: Route,
        /// The payload.
        data: RouteData,
    },

    /// Remember `route` as the current route of its root.
    SetMultiRoute {
        /// Full route to remember.
        route: Route,
        /// Whether handlers should animate when it is restored.
        animated: bool,
    },

    /// Store a payload for a route in the multi-navigation state.
    SetMultiRouteSpecificData {
        /// Route the payload belongs to.
        route: Route,
        /// The payload.
        data: RouteData,
    },
}

impl NavigationAction {
    /// Navigate to `route`, animated.
    pub fn set_route(route: Route) -> Self {
        Self::SetRoute {
            route,
            animated: true,
        }
    }

    /// Push a single segment, animated.
    pub fn push_segment(segment: impl Into<RouteSegment>) -> Self {
        Self::PushRouteSegment {
            segment: segment.into(),
            animated: true,
        }
    }

    /// Pop the last segment, animated.
    pub fn pop_segment() -> Self {
        Self::PopRouteSegment { animated: true }
    }

    /// Swap one route suffix for another, not animated.
    pub fn change_route(
        suffix_to_pop: Vec<RouteSegment>,
        suffix_to_push: Vec<RouteSegment>,
    ) -> Self {
        Self::ChangeRoute {
            suffix_to_pop,
            suffix_to_push,
            animated: false,
        }
    }

    /// Store `data` for `route`.
    pub fn set_route_specific_data<T>(route: Route, data: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::SetRouteSpecificData {
            route,
            data: Arc::new(data),
        }
    }

    /// Remember `route` under its root, animated.
    pub fn set_multi_route(route: Route) -> Self {
        Self::SetMultiRoute {
            route,
            animated: true,
        }
    }

    /// Store `data` for `route` in the multi-navigation state.
    pub fn set_multi_route_specific_data<T>(route: Route, data: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::SetMultiRouteSpecificData {
            route,
            data: Arc::new(data),
        }
    }

    /// Override the animation flag. No effect on data actions.
    pub fn animated(mut self, value: bool) -> Self {
        match &mut self {
            Self::SetRoute { animated, .. }
            | Self::PushRouteSegment { animated, .. }
            | Self::PopRouteSegment { animated }
            | Self::ChangeRoute { animated, .. }
            | Self::SetMultiRoute { animated, .. } => *animated = value,
            Self::SetRouteSpecificData { .. } | Self::SetMultiRouteSpecificData { .. } => {}
        }
        self
    }

    /// Shorthand for `animated(false)`.
    pub fn unanimated(self) -> Self {
        self.animated(false)
    }

    /// Whether the action asks for an animated transition.
    ///
    /// Data actions report `false`.
    pub fn is_animated(&self) -> bool {
        match self {
            Self::SetRoute { animated, .. }
            | Self::PushRouteSegment { animated, .. }
            | Self::PopRouteSegment { animated }
            | Self::ChangeRoute { animated, .. }
            | Self::SetMultiRoute { animated, .. } => *animated,
            Self::SetRouteSpecificData { .. } | Self::SetMultiRouteSpecificData { .. } => false,
        }
    }

    /// Check if this action changes the current route.
    pub fn changes_route(&self) -> bool {
        matches!(
            self,
            Self::SetRoute { .. }
                | Self::PushRouteSegment { .. }
                | Self::PopRouteSegment { .. }
                | Self::ChangeRoute { .. }
        )
    }
}

impl fmt::Debug for NavigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetRoute { route, animated } => f
                .debug_struct("SetRoute")
                .field("route", route)
                .field("animated", animated)
                .finish(),
            Self::PushRouteSegment { segment, animated } => f
                .debug_struct("PushRouteSegment")
                .field("segment", segment)
                .field("animated", animated)
                .finish(),
            Self::PopRouteSegment { animated } => f
                .debug_struct("PopRouteSegment")
                .field("animated", animated)
                .finish(),
            Self::ChangeRoute {
                suffix_to_pop,
                suffix_to_push,
                animated,
            } => f
                .debug_struct("ChangeRoute")
                .field("suffix_to_pop", suffix_to_pop)
                .field("suffix_to_push", suffix_to_push)
                .field("animated", animated)
                .finish(),
            Self::SetRouteSpecificData { route, .. } => f
                .debug_struct("SetRouteSpecificData")
                .field("route", route)
                .finish_non_exhaustive(),
            Self::SetMultiRoute { route, animated } => f
                .debug_struct("SetMultiRoute")
                .field("route", route)
                .field("animated", animated)
                .finish(),
            Self::SetMultiRouteSpecificData { route, .. } => f
                .debug_struct("SetMultiRouteSpecificData")
                .field("route", route)
                .finish_non_exhaustive(),
        }
    }
}
