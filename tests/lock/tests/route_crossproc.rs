//! ROUTE-DETERMINISM-CROSSPROC: cross-process determinism test for route
//! reports.
//!
//! Spawns the `route_fixture` binary under several environment variants and
//! asserts all produce identical output.

use std::path::Path;
use std::process::Command;

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_route_fixture");

    let mut command = Command::new(bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "route_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

// ACCEPTANCE: ROUTE-DETERMINISM-CROSSPROC
#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    assert!(
        baseline.contains("trace_digest=sha256:"),
        "baseline output missing trace_digest"
    );
    assert!(
        baseline.contains("termination=goal_reached"),
        "fixture route should reach the goal: {baseline}"
    );
    assert!(baseline.contains("found=true"));

    let tmp = std::env::temp_dir();
    let variants: [(&str, &[(&str, &str)]); 3] = [
        ("cwd=tmp", &[]),
        ("LC_ALL=C", &[("LC_ALL", "C")]),
        ("LANG=tr_TR.UTF-8", &[("LANG", "tr_TR.UTF-8")]),
    ];
    for (label, env) in variants {
        let dir = if label == "cwd=tmp" {
            tmp.to_string_lossy().to_string()
        } else {
            root.clone()
        };
        let out = run_variant(&dir, env);
        assert_eq!(out, baseline, "variant {label} diverged");
    }
}
