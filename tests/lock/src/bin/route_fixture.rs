//! Binary that runs the `StreetGrid` fixture through the harness and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `route_fixture`
//!
//! Output: key=value lines (see source for format).

use wayfind_harness::runner::run_world;
use wayfind_harness::worlds::StreetGrid;

fn main() {
    let world = StreetGrid::new(6, 5)
        .with_metric_scale(1200.0)
        .close(2, 1)
        .close(2, 2)
        .close(3, 3);
    let run = run_world(&world).expect("route run failed");
    let report = &run.report;

    let termination = serde_json::to_value(report.termination).expect("termination serializes");
    let term_type = termination["type"]
        .as_str()
        .expect("missing termination type");
    let path: Vec<String> = report.path.iter().map(ToString::to_string).collect();
    let distance_bits = report
        .distance_m
        .map_or_else(|| "none".to_owned(), |d| format!("{:016x}", d.to_bits()));

    println!("trace_digest={}", report.trace_digest);
    println!("termination={term_type}");
    println!("found={}", report.found);
    println!("path={}", path.join(","));
    println!("distance_bits={distance_bits}");
    println!("expansions={}", report.expansions);
}
