//! Shared helpers for wayfind benchmark suites.

use wayfind_graph::RoadGraph;
use wayfind_harness::contract::MapWorld;
use wayfind_harness::worlds::StreetGrid;

/// Square street grid of `size × size` intersections with a staggered set of
/// closures, so searches cannot run straight along one street.
///
/// Every third column is closed on alternating halves of the map, which
/// leaves the grid connected.
#[must_use]
pub fn city_world(size: usize) -> StreetGrid {
    let mut world = StreetGrid::new(size, size).with_metric_scale(1000.0);
    let half = size / 2;
    for col in (2..size.saturating_sub(1)).step_by(3) {
        let rows = if (col / 3) % 2 == 0 { 0..half } else { half..size };
        for row in rows {
            world = world.close(col, row);
        }
    }
    world
}

/// Build the graph for [`city_world`].
///
/// # Panics
///
/// Panics if the grid is empty. Benchmark setup failures are fatal.
#[must_use]
pub fn city_graph(size: usize) -> RoadGraph {
    city_world(size).build_graph().expect("city grid builds")
}

/// Corner-to-corner query in percent: `(start_x, start_y, end_x, end_y)`.
pub const CORNER_QUERY: (f64, f64, f64, f64) = (0.0, 0.0, 100.0, 100.0);
