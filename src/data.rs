//! Route-specific data storage.
//!
//! [`RouteDataStore`] associates arbitrary payloads with routes. It is plain
//! storage: no ordering, last writer wins, and it plays no part in diffing.
//!
//! Two key granularities are supported, chosen when the store is created:
//!
//! | Granularity            | Key                                   |
//! |------------------------|---------------------------------------|
//! | [`KeyGranularity::Path`] | [`Route::path_string`] (exact route) |
//! | [`KeyGranularity::Root`] | [`Route::root_string`] (root route)  |
//!
//! Keys are rendered strings, so every route with fewer than two segments maps
//! to the empty key.
//!
//! # Example
//!
//! ```
//! use route_reconciler::{Route, RouteDataStore};
//!
//! let mut store = RouteDataStore::per_route();
//! store.set(&Route::from_ids(["users", "detail"]), "UserID_10".to_string());
//!
//! let id = store.get_as::<String>(&Route::from_ids(["users", "detail"]));
//! assert_eq!(id.map(String::as_str), Some("UserID_10"));
//! ```

use crate::route::{Route, RouteData};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Which rendered form of a route is used as the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyGranularity {
    /// Key by the full rendered path.
    #[default]
    Path,
    /// Key by the rendered root (first two segments).
    Root,
}

impl KeyGranularity {
    /// Storage key for `route` under this granularity.
    pub fn key_for(self, route: &Route) -> String {
        match self {
            KeyGranularity::Path => route.path_string(),
            KeyGranularity::Root => route.root_string(),
        }
    }
}

/// Map from a rendered route key to an opaque payload.
#[derive(Clone, Default)]
pub struct RouteDataStore {
    granularity: KeyGranularity,
    entries: HashMap<String, RouteData>,
}

impl RouteDataStore {
    /// Create an empty store with the given key granularity.
    pub fn new(granularity: KeyGranularity) -> Self {
        Self {
            granularity,
            entries: HashMap::new(),
        }
    }

    /// Store keyed by the exact route.
    pub fn per_route() -> Self {
        Self::new(KeyGranularity::Path)
    }

    /// Store keyed by the root route.
    pub fn per_root() -> Self {
        Self::new(KeyGranularity::Root)
    }

    /// Key granularity of this store.
    pub fn granularity(&self) -> KeyGranularity {
        self.granularity
    }

    /// Store `data` for `route`, replacing any previous value.
    pub fn set<T>(&mut self, route: &Route, data: T)
    where
        T: Any + Send + Sync,
    {
        self.set_shared(route, Arc::new(data));
    }

    /// Store an already shared payload for `route`.
    pub fn set_shared(&mut self, route: &Route, data: RouteData) {
        let key = self.granularity.key_for(route);
        self.entries.insert(key, data);
    }

    /// Store `data` under a raw key.
    pub fn set_key(&mut self, key: impl Into<String>, data: RouteData) {
        self.entries.insert(key.into(), data);
    }

    /// Payload last stored for `route`.
    pub fn get(&self, route: &Route) -> Option<&RouteData> {
        self.entries.get(&self.granularity.key_for(route))
    }

    /// Payload stored under a raw key.
    pub fn get_key(&self, key: &str) -> Option<&RouteData> {
        self.entries.get(key)
    }

    /// Payload for `route`, downcast to `T`.
    ///
    /// Returns `None` if nothing is stored or the payload has another type.
    pub fn get_as<T: Any>(&self, route: &Route) -> Option<&T> {
        self.get(route)?.downcast_ref::<T>()
    }

    /// Remove and return the payload for `route`.
    pub fn remove(&mut self, route: &Route) -> Option<RouteData> {
        self.entries.remove(&self.granularity.key_for(route))
    }

    /// Check whether a payload is stored for `route`.
    pub fn contains(&self, route: &Route) -> bool {
        self.entries.contains_key(&self.granularity.key_for(route))
    }

    /// Number of stored payloads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Remove every payload.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for RouteDataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("RouteDataStore")
            .field("granularity", &self.granularity)
            .field("keys", &keys)
            .finish()
    }
}
