//! Report directory and config-file lock tests.

use std::fs;

use wayfind_graph::RouteGraph;
use wayfind_harness::contract::MapWorld;
use wayfind_harness::map_file::MapFile;
use wayfind_harness::query::RouteQuery;
use wayfind_harness::report_dir::{
    read_report_dir, verify_report_dir, write_report_dir, DIGEST_FILENAME, REPORT_FILENAME,
    TRACE_FILENAME,
};
use wayfind_harness::runner::{run_query, run_world};
use wayfind_harness::worlds::StreetGrid;
use wayfind_harness::HarnessError;
use wayfind_search::NeighborPolicy;

const MAP_JSON: &str = r#"{
  "metric_scale": 1000.0,
  "nodes": [[0.0, 0.0], [0.5, 0.0], [1.0, 0.0], [0.5, 0.5], [1.0, 1.0]],
  "ways": [[0, 1, 2], [1, 3, 4], [2, 4]]
}"#;

const QUERY_TOML: &str = r#"
start = [0.0, 0.0]
end = [100.0, 100.0]

[policy]
max_expansions = 50
neighbor_policy = "strict"
"#;

// ---------------------------------------------------------------------------
// ACCEPTANCE: REPORT-DIR-ROUNDTRIP
// ---------------------------------------------------------------------------

#[test]
fn config_files_to_verified_report() {
    let tmp = tempfile::tempdir().unwrap();
    let map_path = tmp.path().join("map.json");
    let query_path = tmp.path().join("query.toml");
    fs::write(&map_path, MAP_JSON).unwrap();
    fs::write(&query_path, QUERY_TOML).unwrap();

    let graph = MapFile::load(&map_path).unwrap().into_graph().unwrap();
    assert_eq!(graph.node_count(), 5);
    let query = RouteQuery::load(&query_path).unwrap();
    assert_eq!(query.policy.max_expansions, Some(50));
    assert_eq!(query.policy.neighbor_policy, NeighborPolicy::Strict);

    let run = run_query(&graph, &query).unwrap();
    assert!(run.report.found);
    // n0 → n1 → n3 → n4 is shorter than going around via n2.
    let expected = (0.5 + 0.5 + 0.5_f64.hypot(0.5)) * 1000.0;
    assert!((run.report.distance_m.unwrap() - expected).abs() < 1e-6);

    let out = tmp.path().join("out");
    write_report_dir(&out, &run).unwrap();
    for name in [REPORT_FILENAME, TRACE_FILENAME, DIGEST_FILENAME] {
        assert!(out.join(name).is_file(), "{name} not written");
    }

    let stored = verify_report_dir(&out).unwrap();
    assert_eq!(stored.report, run.report);
    assert_eq!(
        fs::read_to_string(out.join(DIGEST_FILENAME)).unwrap(),
        run.report.trace_digest
    );
}

#[test]
fn rewriting_a_directory_is_byte_identical() {
    let world = StreetGrid::new(4, 4).close(1, 1);
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    write_report_dir(a.path(), &run_world(&world).unwrap()).unwrap();
    write_report_dir(b.path(), &run_world(&world).unwrap()).unwrap();

    for name in [REPORT_FILENAME, TRACE_FILENAME, DIGEST_FILENAME] {
        assert_eq!(
            fs::read(a.path().join(name)).unwrap(),
            fs::read(b.path().join(name)).unwrap(),
            "{name} differs between runs"
        );
    }
}

#[test]
fn edited_report_digest_is_rejected() {
    let world = StreetGrid::new(3, 3);
    let tmp = tempfile::tempdir().unwrap();
    write_report_dir(tmp.path(), &run_world(&world).unwrap()).unwrap();

    let mut dir = read_report_dir(tmp.path()).unwrap();
    dir.report.trace_digest = "sha256:00".into();
    fs::write(
        tmp.path().join(REPORT_FILENAME),
        serde_json::to_vec_pretty(&dir.report).unwrap(),
    )
    .unwrap();

    let err = verify_report_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, HarnessError::DigestMismatch { ref stored, .. } if stored == "sha256:00"));
}

#[test]
fn missing_directory_reports_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let err = read_report_dir(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, HarnessError::MissingFile { .. }));
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: CONFIG-REJECTS-BAD-INPUT
// ---------------------------------------------------------------------------

#[test]
fn bad_configs_are_rejected() {
    assert!(matches!(
        RouteQuery::from_toml_str("start = [0.0, 0.0]\nend = [1.0, 1.0]\nspeed = 3\n"),
        Err(HarnessError::Toml(_))
    ));
    assert!(matches!(
        RouteQuery::from_toml_str(
            "start = [0.0, 0.0]\nend = [1.0, 1.0]\n[policy]\nneighbor_policy = \"greedy\"\n"
        ),
        Err(HarnessError::Toml(_))
    ));

    let map = MapFile::from_json_str(r#"{"nodes": [[0, 0], [1, 1]], "ways": [[0, 7]]}"#).unwrap();
    assert!(matches!(map.into_graph(), Err(HarnessError::Graph(_))));
}

#[test]
fn unreadable_query_reports_the_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("absent.toml");
    match RouteQuery::load(&path) {
        Err(HarnessError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn map_file_snapshot_matches_world() {
    let world = StreetGrid::new(3, 2).with_metric_scale(10.0);
    let graph = world.build_graph().unwrap();
    let rebuilt = MapFile::from_graph(&graph).into_graph().unwrap();
    assert_eq!(rebuilt.positions(), graph.positions());
    assert_eq!(rebuilt.ways(), graph.ways());
    assert!((rebuilt.metric_scale() - 10.0).abs() < f64::EPSILON);
}
