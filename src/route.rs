//! Route model.
//!
//! A [`Route`] is an ordered path of [`RouteSegment`]s, one per presented
//! view level, plus a *root* sub-path made of its first two segments. The root
//! is the grouping key for multi-navigation bookkeeping (for example one saved
//! route per tab).
//!
//! Routes are values: every "mutation" ([`appending`](Route::appending),
//! [`removing_last`](Route::removing_last)) builds a new route. The root is
//! derived once at construction and carried over unchanged by those methods.
//!
//! # Identity
//!
//! Segments compare by [`id`](RouteSegment::id) only; the optional
//! [`data`](RouteSegment::data) payload never takes part in equality or
//! hashing. Routes compare by their rendered [`path_string`](Route::path_string),
//! which is empty for routes with fewer than two segments. As a consequence
//! every zero- and one-segment route compares equal to every other one; use
//! [`diff`](crate::diff::diff) to tell them apart.
//!
//! # Example
//!
//! ```
//! use route_reconciler::{Route, RouteSegment};
//!
//! let route = Route::from_ids(["tabs", "inbox", "message-7"]);
//! assert_eq!(route.path_string(), "tabs/inbox/message-7");
//! assert_eq!(route.root_string(), "tabs/inbox");
//!
//! let deeper = route.appending(RouteSegment::new("reply"));
//! assert_eq!(deeper.segment_count(), 4);
//! assert_eq!(deeper.root_string(), "tabs/inbox");
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, Range};
use std::sync::Arc;

/// Separator used when rendering a path or root as a string.
pub const PATH_SEPARATOR: &str = "/";

/// Number of leading segments that make up a route's root.
pub const ROOT_DEPTH: usize = 2;

/// Opaque payload attached to a segment or stored per route.
pub type RouteData = Arc<dyn Any + Send + Sync>;

// ============================================================================
// RouteSegment
// ============================================================================

/// One named node in a route.
#[derive(Clone)]
pub struct RouteSegment {
    /// Stable identifier of the view this segment presents.
    pub id: String,

    /// Optional opaque data handed to the handler along with the segment.
    pub data: Option<RouteData>,
}

impl RouteSegment {
    /// Create a segment without attached data.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: None,
        }
    }

    /// Attach a data payload to this segment.
    pub fn with_data<T>(mut self, data: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.data = Some(Arc::new(data));
        self
    }

    /// Borrow the attached payload as `T`.
    ///
    /// Returns `None` when there is no payload or it has a different type.
    pub fn data_as<T: Any>(&self) -> Option<&T> {
        self.data.as_deref()?.downcast_ref::<T>()
    }
}

impl PartialEq for RouteSegment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RouteSegment {}

impl Hash for RouteSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSegment")
            .field("id", &self.id)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

impl fmt::Display for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<&str> for RouteSegment {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RouteSegment {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Route
// ============================================================================

/// An ordered path of named segments representing a navigation target.
#[derive(Clone, Default)]
pub struct Route {
    path: Vec<RouteSegment>,
    root: Vec<RouteSegment>,
}

impl Route {
    /// Create a route from `path`, deriving the root from its first two segments.
    pub fn new(path: Vec<RouteSegment>) -> Self {
        let root = derive_root(&path);
        Self { path, root }
    }

    /// Create a route with an explicit root instead of a derived one.
    pub fn with_root(path: Vec<RouteSegment>, root: Vec<RouteSegment>) -> Self {
        Self { path, root }
    }

    /// Create a route from segment ids, without attached data.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(RouteSegment::new).collect())
    }

    /// The empty route ("no navigation target").
    pub fn empty() -> Self {
        Self::default()
    }

    /// All segments of the route.
    pub fn path(&self) -> &[RouteSegment] {
        &self.path
    }

    /// The root segments (at most the first two).
    pub fn root(&self) -> &[RouteSegment] {
        &self.root
    }

    /// Number of segments in the route.
    pub fn segment_count(&self) -> usize {
        self.path.len()
    }

    /// Whether the route has no segments.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Segment at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&RouteSegment> {
        self.path.get(index)
    }

    /// Deepest segment, if any.
    pub fn last(&self) -> Option<&RouteSegment> {
        self.path.last()
    }

    /// Segments in `range`.
    ///
    /// A range that is inverted or reaches past the end of the path does not
    /// fail: the whole path is returned instead.
    pub fn sub_path(&self, range: Range<usize>) -> Vec<RouteSegment> {
        if range.start <= range.end && range.end <= self.path.len() {
            self.path[range].to_vec()
        } else {
            self.path.clone()
        }
    }

    /// Route made of the segments in `range`, with a freshly derived root.
    ///
    /// Same permissive range handling as [`sub_path`](Self::sub_path).
    pub fn sub_route(&self, range: Range<usize>) -> Route {
        Route::new(self.sub_path(range))
    }

    /// New route with `segment` appended; the root is kept as is.
    pub fn appending(&self, segment: impl Into<RouteSegment>) -> Route {
        let mut path = self.path.clone();
        path.push(segment.into());
        Route::with_root(path, self.root.clone())
    }

    /// New route without the last segment; the root is kept as is.
    ///
    /// Removing from an empty route yields another empty route.
    pub fn removing_last(&self) -> Route {
        let mut path = self.path.clone();
        path.pop();
        Route::with_root(path, self.root.clone())
    }

    /// The path rendered as `a/b/c`; empty if the route has fewer than two segments.
    pub fn path_string(&self) -> String {
        render(&self.path)
    }

    /// The root rendered as `a/b`; empty if the root has fewer than two segments.
    pub fn root_string(&self) -> String {
        render(&self.root)
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> std::slice::Iter<'_, RouteSegment> {
        self.path.iter()
    }
}

fn derive_root(path: &[RouteSegment]) -> Vec<RouteSegment> {
    if path.len() < ROOT_DEPTH {
        Vec::new()
    } else {
        path[..ROOT_DEPTH].to_vec()
    }
}

fn render(segments: &[RouteSegment]) -> String {
    if segments.len() < 2 {
        return String::new();
    }
    segments
        .iter()
        .map(|segment| segment.id.as_str())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.path_string() == other.path_string()
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path_string().hash(state);
    }
}

impl Index<usize> for Route {
    type Output = RouteSegment;

    fn index(&self, index: usize) -> &Self::Output {
        &self.path[index]
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a RouteSegment;
    type IntoIter = std::slice::Iter<'a, RouteSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.iter()
    }
}

impl FromIterator<RouteSegment> for Route {
    fn from_iter<T: IntoIterator<Item = RouteSegment>>(iter: T) -> Self {
        Route::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.path.iter().map(|s| s.id.as_str()).collect();
        let root: Vec<&str> = self.root.iter().map(|s| s.id.as_str()).collect();
        f.debug_struct("Route")
            .field("path", &ids)
            .field("root", &root)
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Route path={}, root={}]",
            self.path_string(),
            self.root_string()
        )
    }
}
