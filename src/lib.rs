//! # route-reconciler
//!
//! Declarative navigation for hierarchical UIs. The application says *where*
//! it wants to be as a [`Route`]; the [`Router`] works out *how* to get there
//! and drives a chain of [`NavigationHandler`]s through the minimal sequence of
//! push, pop and replace operations.
//!
//! ## Pieces
//!
//! - [`route`]: the [`Route`] and [`RouteSegment`] value types.
//! - [`diff`]: the pure diff from one route to another.
//! - [`handler`]: the [`NavigationHandler`] capability and its [`Completion`] token.
//! - [`router`]: the serial execution engine with bounded completion waits.
//! - [`action`], [`state`], [`store`]: navigation intents, reducers and an
//!   observable state container the router can subscribe to.
//! - [`data`]: route-specific payload storage.
//!
//! ## Quick start
//!
//! ```
//! use route_reconciler::{
//!     BoxedHandler, Completion, ImmediateHandler, NavigationAction, NavigationHandler,
//!     NavigationStore, RouteSegment, Router, RouterConfig,
//! };
//! use std::time::Duration;
//!
//! struct Window;
//!
//! impl NavigationHandler for Window {
//!     fn push(
//!         &mut self,
//!         segment: &RouteSegment,
//!         animated: bool,
//!         completion: Completion,
//!     ) -> BoxedHandler {
//!         println!("show {} (animated: {animated})", segment.id);
//!         completion.complete();
//!         Box::new(ImmediateHandler::new())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "Window"
//!     }
//! }
//!
//! let store = NavigationStore::default();
//! let (router, _subscription) = Router::attach(&store, Window, RouterConfig::default())?;
//!
//! store.dispatch(&NavigationAction::push_segment("home"));
//! store.dispatch(&NavigationAction::push_segment("settings"));
//!
//! let snapshot = router.wait_idle(Duration::from_secs(1))?;
//! assert_eq!(snapshot.chain_depth, 3);
//! # Ok::<(), route_reconciler::RouterError>(())
//! ```
//!
//! ## Features
//!
//! - `log` (default): log through the `log` crate.
//! - `tracing`: log through the `tracing` crate instead.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
pub mod logging;

pub mod action;
pub mod data;
pub mod diff;
pub mod error;
pub mod handler;
pub mod route;
pub mod router;
pub mod state;
pub mod store;

pub use action::NavigationAction;
pub use data::{KeyGranularity, RouteDataStore};
pub use diff::{common_prefix_len, diff, OperationKind, RoutingOperation};
pub use error::{navigation_stuck, RouterError, StuckHandler, StuckNavigation, StuckReason};
pub use handler::{BoxedHandler, Completion, ImmediateHandler, NavigationHandler};
pub use route::{Route, RouteData, RouteSegment};
pub use router::{Router, RouterConfig, RouterSnapshot, DEFAULT_COMPLETION_TIMEOUT};
pub use state::{reduce_multi_navigation, reduce_navigation, MultiNavigationState, NavigationState};
pub use store::{subscriber_fn, FnSubscriber, NavigationStore, StateSubscriber, SubscriptionId};
