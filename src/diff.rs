//! Route diffing.
//!
//! # Architecture
//!
//! The router never re-presents a whole hierarchy. When a new route is
//! committed, it is compared with the last applied one and turned into a short
//! list of [`RoutingOperation`]s, each addressed to the handler that owns the
//! parent of the affected segment.
//!
//! Handler indices are offset by one from segment indices, because the root
//! handler is not represented in the route:
//!
//! ```text
//! route   = [tabs, inbox, message]
//! chain   = [Root, Tabs,  Inbox, Message]
//!            [0]   [1]    [2]    [3]
//! ```
//!
//! `chain[k]` presents `route[k - 1]` and is responsible for pushing, popping
//! or replacing `route[k]`.
//!
//! # Example
//!
//! From `[tabs, inbox, message]` to `[tabs, settings, profile]`:
//!
//! ```text
//! common prefix: [tabs]                     (last common index 0)
//! Pop(2, message)    ← Inbox removes Message
//! Replace(1, inbox → settings)
//! Push(2, profile)   ← Settings presents Profile
//! ```
//!
//! Pops always run deepest first, then at most one replace, then pushes from
//! the shallowest level down.

use crate::route::{Route, RouteSegment};
use std::fmt;

// ============================================================================
// RoutingOperation
// ============================================================================

/// One step of a route transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingOperation {
    /// `handler_index` presents `segment` as a new child.
    Push {
        /// Chain index of the handler performing the push.
        handler_index: usize,
        /// Segment to present.
        segment: RouteSegment,
    },

    /// `handler_index` removes its child presenting `segment`.
    Pop {
        /// Chain index of the handler performing the pop.
        handler_index: usize,
        /// Segment being removed.
        segment: RouteSegment,
    },

    /// `handler_index` swaps its child `from` for `to`.
    Replace {
        /// Chain index of the handler performing the replacement.
        handler_index: usize,
        /// Segment currently presented.
        from: RouteSegment,
        /// Segment to present instead.
        to: RouteSegment,
    },
}

/// Discriminant of a [`RoutingOperation`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// [`RoutingOperation::Push`]
    Push,
    /// [`RoutingOperation::Pop`]
    Pop,
    /// [`RoutingOperation::Replace`]
    Replace,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Push => f.write_str("push"),
            OperationKind::Pop => f.write_str("pop"),
            OperationKind::Replace => f.write_str("replace"),
        }
    }
}

impl RoutingOperation {
    /// Chain index of the handler responsible for this operation.
    pub fn handler_index(&self) -> usize {
        match self {
            RoutingOperation::Push { handler_index, .. }
            | RoutingOperation::Pop { handler_index, .. }
            | RoutingOperation::Replace { handler_index, .. } => *handler_index,
        }
    }

    /// Kind of operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            RoutingOperation::Push { .. } => OperationKind::Push,
            RoutingOperation::Pop { .. } => OperationKind::Pop,
            RoutingOperation::Replace { .. } => OperationKind::Replace,
        }
    }

    /// Check if this is a push.
    pub fn is_push(&self) -> bool {
        matches!(self, RoutingOperation::Push { .. })
    }

    /// Check if this is a pop.
    pub fn is_pop(&self) -> bool {
        matches!(self, RoutingOperation::Pop { .. })
    }

    /// Check if this is a replace.
    pub fn is_replace(&self) -> bool {
        matches!(self, RoutingOperation::Replace { .. })
    }
}

impl fmt::Display for RoutingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingOperation::Push {
                handler_index,
                segment,
            } => write!(f, "Push({}, {})", handler_index, segment),
            RoutingOperation::Pop {
                handler_index,
                segment,
            } => write!(f, "Pop({}, {})", handler_index, segment),
            RoutingOperation::Replace {
                handler_index,
                from,
                to,
            } => write!(f, "Replace({}, {} -> {})", handler_index, from, to),
        }
    }
}

// ============================================================================
// Diff
// ============================================================================

/// Handler index responsible for the segment at `segment_index + 1`.
#[inline]
fn handler_for(segment_index: isize) -> usize {
    (segment_index + 1) as usize
}

/// Number of leading segments both routes share (compared by id).
pub fn common_prefix_len(old: &Route, new: &Route) -> usize {
    old.iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Compute the operations that turn a presentation of `old` into one of `new`.
///
/// The result is ordered: every [`Pop`](RoutingOperation::Pop) (deepest
/// first), then at most one [`Replace`](RoutingOperation::Replace), then every
/// [`Push`](RoutingOperation::Push) (shallowest first). Identical routes
/// produce an empty list.
///
/// # Example
///
/// ```
/// use route_reconciler::{diff, Route, RoutingOperation, RouteSegment};
///
/// let ops = diff(&Route::from_ids(["a", "b"]), &Route::from_ids(["a", "c", "d"]));
/// assert_eq!(ops, vec![
///     RoutingOperation::Replace {
///         handler_index: 1,
///         from: RouteSegment::new("b"),
///         to: RouteSegment::new("c"),
///     },
///     RoutingOperation::Push { handler_index: 2, segment: RouteSegment::new("d") },
/// ]);
/// ```
pub fn diff(old: &Route, new: &Route) -> Vec<RoutingOperation> {
    let old_len = old.segment_count() as isize;
    let new_len = new.segment_count() as isize;
    // Index of the last shared segment, -1 when the routes diverge at the root.
    let common = common_prefix_len(old, new) as isize - 1;

    if common == old_len - 1 && common == new_len - 1 {
        return Vec::new();
    }

    let mut operations = Vec::new();

    // Cursor over the route being built, starting at the end of the old route.
    let mut cursor = old_len - 1;

    // Everything strictly beyond the boundary segment goes away first.
    while cursor > common + 1 {
        operations.push(RoutingOperation::Pop {
            handler_index: handler_for(cursor - 1),
            segment: old[cursor as usize].clone(),
        });
        cursor -= 1;
    }

    // Boundary segment at common + 1.
    if old_len > new_len {
        operations.push(RoutingOperation::Pop {
            handler_index: handler_for(cursor - 1),
            segment: old[cursor as usize].clone(),
        });
        cursor -= 1;
    } else if old_len > common + 1 && new_len > common + 1 {
        let boundary = (common + 1) as usize;
        operations.push(RoutingOperation::Replace {
            handler_index: handler_for(common),
            from: old[boundary].clone(),
            to: new[boundary].clone(),
        });
    }

    // Present whatever the new route still lacks.
    while cursor < new_len - 1 {
        operations.push(RoutingOperation::Push {
            handler_index: handler_for(cursor),
            segment: new[(cursor + 1) as usize].clone(),
        });
        cursor += 1;
    }

    operations
}
