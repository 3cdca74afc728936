//! Diff behaviour through the public API.

mod common;

use common::route;
use route_reconciler::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn push(index: usize, id: &str) -> RoutingOperation {
    RoutingOperation::Push {
        handler_index: index,
        segment: RouteSegment::new(id),
    }
}

fn pop(index: usize, id: &str) -> RoutingOperation {
    RoutingOperation::Pop {
        handler_index: index,
        segment: RouteSegment::new(id),
    }
}

fn replace(index: usize, from: &str, to: &str) -> RoutingOperation {
    RoutingOperation::Replace {
        handler_index: index,
        from: RouteSegment::new(from),
        to: RouteSegment::new(to),
    }
}

fn hash_of(route: &Route) -> u64 {
    let mut hasher = DefaultHasher::new();
    route.hash(&mut hasher);
    hasher.finish()
}

// ---- canonical transitions ----

#[test]
fn test_empty_to_empty() {
    assert!(diff(&Route::empty(), &Route::empty()).is_empty());
}

#[test]
fn test_identical_routes_produce_nothing() {
    let r = route(&["tabs", "inbox", "message"]);
    assert!(diff(&r, &r.clone()).is_empty());
}

#[test]
fn test_replace_last_segment() {
    let ops = diff(&route(&["A", "B"]), &route(&["A", "C"]));
    assert_eq!(ops, vec![replace(1, "B", "C")]);
}

#[test]
fn test_replace_at_root_handler() {
    let ops = diff(&route(&["A"]), &route(&["B"]));
    assert_eq!(ops, vec![replace(0, "A", "B")]);
}

#[test]
fn test_push_from_empty() {
    let ops = diff(&Route::empty(), &route(&["A", "B"]));
    assert_eq!(ops, vec![push(0, "A"), push(1, "B")]);
}

#[test]
fn test_pop_deepest_first() {
    let ops = diff(&route(&["A", "B", "C"]), &route(&["A"]));
    assert_eq!(ops, vec![pop(2, "C"), pop(1, "B")]);
}

#[test]
fn test_replace_then_push() {
    let ops = diff(&route(&["A", "B"]), &route(&["A", "C", "D"]));
    assert_eq!(ops, vec![replace(1, "B", "C"), push(2, "D")]);
}

#[test]
fn test_pop_everything() {
    let ops = diff(&route(&["A", "B"]), &Route::empty());
    assert_eq!(ops, vec![pop(1, "B"), pop(0, "A")]);
}

#[test]
fn test_shrinking_to_a_new_branch_pops_then_pushes() {
    // No replace when the old route is longer than the new one.
    let ops = diff(&route(&["A", "B", "C"]), &route(&["A", "X"]));
    assert_eq!(ops, vec![pop(2, "C"), pop(1, "B"), push(1, "X")]);

    let ops = diff(&route(&["a", "b"]), &route(&["c"]));
    assert_eq!(ops, vec![pop(1, "b"), pop(0, "a"), push(0, "c")]);
}

#[test]
fn test_operation_order_is_pops_replace_pushes() {
    let ops = diff(&route(&["A", "B", "C"]), &route(&["A", "X", "Y", "Z"]));
    let kinds: Vec<OperationKind> = ops.iter().map(RoutingOperation::kind).collect();
    assert_eq!(
        kinds,
        vec![
            OperationKind::Pop,
            OperationKind::Replace,
            OperationKind::Push,
            OperationKind::Push,
        ]
    );
    assert_eq!(ops[0], pop(2, "C"));
    assert_eq!(ops[1], replace(1, "B", "X"));
}

// ---- segment payloads ----

#[test]
fn test_payloads_do_not_affect_diff() {
    let old = Route::new(vec![
        RouteSegment::new("users"),
        RouteSegment::new("detail").with_data(1_u32),
    ]);
    let new = Route::new(vec![
        RouteSegment::new("users"),
        RouteSegment::new("detail").with_data(2_u32),
    ]);
    assert!(diff(&old, &new).is_empty());
}

#[test]
fn test_payloads_do_not_affect_equality_or_hash() {
    let plain = route(&["users", "detail"]);
    let with_data = Route::new(vec![
        RouteSegment::new("users"),
        RouteSegment::new("detail").with_data("UserID_10".to_string()),
    ]);
    assert_eq!(plain, with_data);
    assert_eq!(hash_of(&plain), hash_of(&with_data));
}

#[test]
fn test_pushed_segment_keeps_its_payload() {
    let new = Route::new(vec![RouteSegment::new("profile").with_data(7_i64)]);
    let ops = diff(&Route::empty(), &new);
    match &ops[0] {
        RoutingOperation::Push { segment, .. } => assert_eq!(segment.data_as::<i64>(), Some(&7)),
        other => panic!("expected push, got {other}"),
    }
}

// ---- display ----

#[test]
fn test_operation_display() {
    let ops = diff(&route(&["A", "B"]), &route(&["A", "C", "D"]));
    let rendered: Vec<String> = ops.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["Replace(1, B -> C)", "Push(2, D)"]);
}
