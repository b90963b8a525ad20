//! Optimality lock tests: the default neighbor policy agrees with a Dijkstra
//! oracle on random street grids, and every selected node has the lowest `f`
//! in the open set and no lower `f` than the previous selection.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use proptest::prelude::*;
use wayfind_graph::{NodeId, RoadGraph, RouteGraph};
use wayfind_harness::contract::MapWorld;
use wayfind_harness::worlds::StreetGrid;
use wayfind_search::{AStarSearch, RoutePlanner, SearchPolicy};

/// Shortest path length from `start` to `goal` in meters, or `None`.
///
/// Plain Dijkstra over the same adjacency. Distances are non-negative, so
/// their IEEE bit patterns order the same way as the values.
fn dijkstra(graph: &RoadGraph, start: NodeId, goal: NodeId) -> Option<f64> {
    let mut dist = vec![f64::INFINITY; graph.node_count()];
    let mut heap = BinaryHeap::new();
    dist[start.index()] = 0.0;
    heap.push(Reverse((0.0_f64.to_bits(), start)));

    while let Some(Reverse((bits, node))) = heap.pop() {
        let d = f64::from_bits(bits);
        if d > dist[node.index()] {
            continue;
        }
        if node == goal {
            return Some(d * graph.metric_scale());
        }
        for &next in graph.neighbors(node) {
            let nd = d + graph.distance(node, next);
            if nd < dist[next.index()] {
                dist[next.index()] = nd;
                heap.push(Reverse((nd.to_bits(), next)));
            }
        }
    }
    None
}

fn grid_strategy() -> impl Strategy<Value = StreetGrid> {
    (2usize..8, 2usize..8, 1.0f64..2000.0)
        .prop_flat_map(|(cols, rows, scale)| {
            let closed = prop::collection::vec((0..cols, 0..rows), 0..(cols * rows / 3 + 1));
            (Just(cols), Just(rows), Just(scale), closed)
        })
        .prop_map(|(cols, rows, scale, closed)| {
            closed
                .into_iter()
                .fold(StreetGrid::new(cols, rows).with_metric_scale(scale), |g, (c, r)| {
                    g.close(c, r)
                })
        })
}

fn percent() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

proptest! {
    // ACCEPTANCE: ROUTE-OPTIMAL-VS-DIJKSTRA
    #[test]
    fn strict_matches_dijkstra(
        grid in grid_strategy(),
        sx in percent(), sy in percent(), ex in percent(), ey in percent(),
    ) {
        let g = grid.build_graph().unwrap();
        let planner = RoutePlanner::new(&g, sx, sy, ex, ey).unwrap();
        let oracle = dijkstra(&g, planner.start_node(), planner.end_node());
        let outcome = planner.run().unwrap();

        match oracle {
            Some(expected) => {
                let found = outcome.distance();
                prop_assert!(found.is_some(), "oracle found a route, A* did not");
                let found = found.unwrap_or_default();
                prop_assert!(
                    (found - expected).abs() <= 1e-9 * expected.max(1.0),
                    "A* {found} vs Dijkstra {expected}"
                );
            }
            None => prop_assert!(outcome.path.is_none()),
        }
    }

    // ACCEPTANCE: ROUTE-SELECT-LOWEST-F
    #[test]
    fn selected_node_has_lowest_open_f(
        grid in grid_strategy(),
        sx in percent(), sy in percent(), ex in percent(), ey in percent(),
    ) {
        let g = grid.build_graph().unwrap();
        let planner = RoutePlanner::new(&g, sx, sy, ex, ey).unwrap();
        let mut search = AStarSearch::new(
            &g,
            planner.start_node(),
            planner.end_node(),
            SearchPolicy::default(),
        )
        .unwrap();
        search.seed();

        let mut last_f = f64::NEG_INFINITY;
        while let Some(node) = search.select_next() {
            let f = search.state(node).map_or(f64::NAN, |s| s.f_value());
            prop_assert!(f >= last_f - 1e-12, "f went from {last_f} to {f} at {node}");
            last_f = f;
            for entry in search.open_set().iter() {
                let current = search
                    .state(entry.node)
                    .is_some_and(|s| entry.is_current(s));
                if current {
                    prop_assert!(
                        f <= entry.f_value(),
                        "{node} (f={f}) selected over {} (f={})",
                        entry.node,
                        entry.f_value()
                    );
                }
            }
            if node == search.goal() {
                break;
            }
            search.expand(node);
        }
    }
}

#[test]
fn oracle_agrees_on_a_fixed_detour() {
    // A wall down column 2 except at the top row forces a detour.
    let grid = StreetGrid::new(5, 5)
        .close(2, 0)
        .close(2, 1)
        .close(2, 2)
        .close(2, 3);
    let g = grid.build_graph().unwrap();
    let start = grid.node_at(0, 0);
    let goal = grid.node_at(4, 0);
    let expected = dijkstra(&g, start, goal).unwrap();
    // Up four rows, across four columns, down four rows.
    assert!((expected - 3.0).abs() < 1e-9);

    let path = RoutePlanner::new(&g, 0.0, 0.0, 100.0, 0.0)
        .unwrap()
        .route()
        .unwrap();
    assert!((path.distance - expected).abs() < 1e-9);
    assert!(path.node_ids().contains(&grid.node_at(2, 4)));
}
