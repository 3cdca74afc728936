//! Property tests for the diff and the handler chain.

mod common;

use proptest::prelude::*;
use route_reconciler::*;

/// Route ids from a tiny alphabet so generated routes share prefixes often.
fn ids() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 0..6)
}

/// Replay `operations` on a model chain of presented ids, checking that each
/// operation addresses the handler that owns the affected level.
fn replay(chain: &mut Vec<String>, operations: &[RoutingOperation]) -> Result<(), TestCaseError> {
    for operation in operations {
        match operation {
            RoutingOperation::Push {
                handler_index,
                segment,
            } => {
                prop_assert_eq!(*handler_index, chain.len() - 1);
                chain.push(segment.id.clone());
            }
            RoutingOperation::Pop {
                handler_index,
                segment,
            } => {
                prop_assert!(chain.len() >= 2);
                prop_assert_eq!(*handler_index, chain.len() - 2);
                prop_assert_eq!(chain.last(), Some(&segment.id));
                chain.pop();
            }
            RoutingOperation::Replace {
                handler_index,
                from,
                to,
            } => {
                prop_assert_eq!(*handler_index + 2, chain.len());
                prop_assert_eq!(&chain[handler_index + 1], &from.id);
                chain[handler_index + 1] = to.id.clone();
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_diff_of_route_with_itself_is_empty(path in ids()) {
        let route = Route::from_ids(path);
        prop_assert!(diff(&route, &route).is_empty());
    }

    #[test]
    fn prop_replay_reaches_new_route(old in ids(), new in ids()) {
        let old_route = Route::from_ids(old.clone());
        let new_route = Route::from_ids(new.clone());

        let mut chain: Vec<String> = std::iter::once("root")
            .chain(old.iter().copied())
            .map(str::to_string)
            .collect();
        replay(&mut chain, &diff(&old_route, &new_route))?;

        prop_assert_eq!(chain.len(), 1 + new.len());
        prop_assert_eq!(&chain[1..], new.as_slice());
    }

    #[test]
    fn prop_operations_are_grouped_pops_replace_pushes(old in ids(), new in ids()) {
        let operations = diff(&Route::from_ids(old), &Route::from_ids(new));
        let rank = |op: &RoutingOperation| match op.kind() {
            OperationKind::Pop => 0,
            OperationKind::Replace => 1,
            OperationKind::Push => 2,
        };
        prop_assert!(operations.windows(2).all(|pair| rank(&pair[0]) <= rank(&pair[1])));
        prop_assert!(operations.iter().filter(|op| op.is_replace()).count() <= 1);
    }

    #[test]
    fn prop_payloads_never_change_equality(path in ids(), payload in any::<u64>()) {
        let plain = Route::from_ids(path.clone());
        let with_data: Route = path
            .iter()
            .map(|id| RouteSegment::new(*id).with_data(payload))
            .collect();
        prop_assert_eq!(&plain, &with_data);
        prop_assert!(diff(&plain, &with_data).is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_router_chain_depth_follows_routes(routes in prop::collection::vec(ids(), 1..6)) {
        common::init_logging();
        let router = Router::with_root(ImmediateHandler::new()).unwrap();
        for path in &routes {
            router.navigate(Route::from_ids(path.iter().copied()), true).unwrap();
        }
        let snapshot = router.wait_idle(common::IDLE).unwrap();
        router.shutdown().unwrap();

        let last = routes.last().map_or(0, Vec::len);
        prop_assert_eq!(snapshot.chain_depth, 1 + last);
        prop_assert_eq!(snapshot.stuck_operations, 0);
    }
}
