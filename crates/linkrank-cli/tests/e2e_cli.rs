//! E2E CLI tests covering:
//! - `linkrank stats` in JSON and text modes
//! - `linkrank hits` top-k output, k precedence (flag > env > config file)
//! - `linkrank compare` over a directory, CSV reports, per-dataset failures
//! - Error codes for malformed and degenerate datasets
//!
//! Each test runs the binary as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the linkrank binary, rooted in `dir`.
fn linkrank(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("linkrank"));
    cmd.current_dir(dir);
    cmd.env("LINKRANK_LOG", "error");
    cmd.env_remove("LINKRANK_TOP_K");
    cmd.env_remove("LINKRANK_TIMING");
    cmd.env_remove("FORMAT");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

fn json_of(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("binary runs");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

const CYCLE: &str = "# four-cycle\n0 1\n1 2\n2 3\n3 0\n";
const STAR: &str = "1\t0\n2\t0\n3\t0\n1\t2\n";

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_reports_graph_shape() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "gaps.txt", "10 12\n12 14\n");

    let json = json_of(linkrank(dir.path()).args(["stats", "gaps.txt", "--json"]));
    assert_eq!(json["dataset"], "gaps");
    assert_eq!(json["node_count"], 5);
    assert_eq!(json["edge_count"], 2);
    assert_eq!(json["min_node_id"], 10);
    assert_eq!(json["isolated_nodes"], 2);
}

#[test]
fn stats_text_has_header_and_row() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycle.txt", CYCLE);

    linkrank(dir.path())
        .args(["--format", "text", "stats", "cycle.txt"])
        .assert()
        .success()
        .stdout(concat!(
            "dataset\tnodes\tedges\tmin\tmax\tisolated\tmax_in\tmax_out\n",
            "cycle\t4\t4\t0\t3\t0\t1\t1\n",
        ));
}

#[test]
fn stats_on_unaddressable_range_reports_allocation_code() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "sparse.txt", "0 4294967295\n");

    linkrank(dir.path())
        .args(["--format", "text", "stats", "sparse.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2001]"));
}

#[test]
fn malformed_dataset_reports_code() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "bad.txt", "0 1\n1 two\n");

    linkrank(dir.path())
        .args(["--format", "text", "stats", "bad.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_dataset_reports_io_code() {
    let dir = TempDir::new().expect("tempdir");
    linkrank(dir.path())
        .args(["--json", "stats", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error_code\": \"E1001\""));
}

// ---------------------------------------------------------------------------
// hits
// ---------------------------------------------------------------------------

#[test]
fn hits_cycle_is_uniform() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycle.txt", CYCLE);

    let json = json_of(linkrank(dir.path()).args(["hits", "cycle.txt", "-k", "4", "--json"]));
    assert_eq!(json["steps"], 2);
    let authority = json["authority"]["4"].as_array().expect("k = 4 list");
    assert_eq!(authority.len(), 4);
    for entry in authority {
        let score = entry["score"].as_f64().expect("score");
        assert!((score - 0.25).abs() < 1e-12);
    }
    let ids: Vec<u64> = authority
        .iter()
        .map(|e| e["node"].as_u64().expect("node"))
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn hits_skips_oversized_k() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "star.txt", STAR);

    let json = json_of(linkrank(dir.path()).args(["hits", "star.txt", "-k", "1,9", "--json"]));
    assert_eq!(json["authority"]["1"][0]["node"], 0);
    assert_eq!(json["hub"]["1"][0]["node"], 1);
    assert!(json["authority"].get("9").is_none());
    assert_eq!(json["rejected_k"], serde_json::json!([9]));
}

#[test]
fn hits_k_precedence() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycle.txt", CYCLE);
    write(dir.path(), "linkrank.toml", "top_k = [3]\n");

    let from_file = json_of(linkrank(dir.path()).args(["hits", "cycle.txt", "--json"]));
    assert!(from_file["authority"].get("3").is_some());

    let from_env = json_of(
        linkrank(dir.path())
            .env("LINKRANK_TOP_K", "2")
            .args(["hits", "cycle.txt", "--json"]),
    );
    assert!(from_env["authority"].get("2").is_some());
    assert!(from_env["authority"].get("3").is_none());

    let from_flag = json_of(
        linkrank(dir.path())
            .env("LINKRANK_TOP_K", "2")
            .args(["hits", "cycle.txt", "-k", "1", "--json"]),
    );
    assert!(from_flag["authority"].get("1").is_some());
    assert!(from_flag["authority"].get("2").is_none());
}

#[test]
fn hits_empty_graph_is_degenerate() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "empty.txt", "# nothing here\n");

    linkrank(dir.path())
        .args(["--format", "text", "hits", "empty.txt", "-k", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3001"));
}

#[test]
fn bad_config_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycle.txt", CYCLE);
    write(dir.path(), "custom.toml", "top_k = [0]\n");

    linkrank(dir.path())
        .args(["--config", "custom.toml", "hits", "cycle.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1003]"))
        .stderr(predicate::str::contains("custom.toml"));
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

#[test]
fn compare_directory_writes_csv() {
    let dir = TempDir::new().expect("tempdir");
    let data = dir.path().join("data");
    fs::create_dir(&data).expect("mkdir");
    write(&data, "a_cycle.txt", CYCLE);
    write(&data, "b_star.txt", STAR);
    write(&data, "README.md", "not a dataset");

    let json = json_of(linkrank(dir.path()).args([
        "compare", "data", "-k", "1,2", "--out", "results", "--json",
    ]));

    let datasets = json["datasets"].as_array().expect("datasets");
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0]["name"], "a_cycle");
    assert_eq!(datasets[1]["name"], "b_star");
    assert_eq!(json["failures"].as_array().map(Vec::len), Some(0));

    let pairs = datasets[0]["jaccard"][0]["pairs"].as_array().expect("pairs");
    assert_eq!(pairs.len(), 6);
    assert_eq!(pairs[0]["pair"], "InDegree VS HITS (authority)");
    assert_eq!(pairs[5]["pair"], "HITS (authority) VS HITS (hub)");

    let jaccard = fs::read_to_string(dir.path().join("results/jaccard.csv")).expect("jaccard.csv");
    assert!(jaccard.starts_with("dataset,k,InDegree VS HITS (authority),"));
    assert_eq!(jaccard.lines().count(), 1 + 2 * 2);

    let rankings =
        fs::read_to_string(dir.path().join("results/rankings.csv")).expect("rankings.csv");
    assert!(rankings.starts_with("dataset,method,k,rank,node,score\n"));
    // 2 datasets × 4 methods × (1 + 2) entries, plus header
    assert_eq!(rankings.lines().count(), 1 + 2 * 4 * 3);
}

#[test]
fn compare_continues_past_failed_dataset() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "a.txt", CYCLE);
    write(dir.path(), "b.txt", "0 1 2\n");

    let json = json_of(linkrank(dir.path()).args(["compare", ".", "-k", "2", "--json"]));
    assert_eq!(json["datasets"].as_array().map(Vec::len), Some(1));
    let failures = json["failures"].as_array().expect("failures");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["dataset"], "b");
    assert_eq!(failures[0]["error_code"], "E1002");
}

#[test]
fn compare_survives_unaddressable_dataset() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "a.txt", CYCLE);
    write(dir.path(), "b.txt", "0 4294967295\n");

    let json = json_of(linkrank(dir.path()).args(["compare", ".", "-k", "1", "--json"]));
    assert_eq!(json["datasets"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["datasets"][0]["name"], "a");
    assert_eq!(json["failures"][0]["dataset"], "b");
    assert_eq!(json["failures"][0]["error_code"], "E2001");
}

#[test]
fn compare_fails_when_every_dataset_fails() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "empty.txt", "");

    linkrank(dir.path())
        .args(["--format", "text", "compare", ".", "-k", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("empty\tfailed"))
        .stderr(predicate::str::contains("all 1 datasets failed"));
}

#[test]
fn compare_uses_config_paths() {
    let dir = TempDir::new().expect("tempdir");
    let data = dir.path().join("graphs");
    fs::create_dir(&data).expect("mkdir");
    write(&data, "cycle.txt", CYCLE);
    write(
        dir.path(),
        "linkrank.toml",
        "top_k = [2]\ndatasets = \"graphs\"\noutput_dir = \"out\"\n",
    );

    linkrank(dir.path())
        .args(["--format", "text", "compare"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cycle\t2\tInDegree VS PageRank\t1"));
    assert!(dir.path().join("out/rankings.csv").is_file());
}

#[test]
fn timing_report_goes_to_stderr() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycle.txt", CYCLE);

    linkrank(dir.path())
        .args(["--timing", "--format", "text", "hits", "cycle.txt", "-k", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("timing report"))
        .stderr(predicate::str::contains("co-citation"));
}
