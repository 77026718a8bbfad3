use std::process::{Command, Output};
use std::{env, fs, path::PathBuf};

use tempfile::tempdir;

const SEARCH_ENV: [&str; 6] = [
    "FACTINDEX_SEARCH_APP_ID",
    "FACTINDEX_SEARCH_API_KEY",
    "FACTINDEX_SEARCH_ENDPOINT",
    "FACTINDEX_BASE_PATH",
    "FACTINDEX_SEARCH_INDEX",
    "FACTINDEX_SUGGESTIONS_INDEX",
];

fn cli_bin_path() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_factindex-cli") {
        return PathBuf::from(path);
    }
    if let Ok(path) = env::var("CARGO_BIN_EXE_factindex_cli") {
        return PathBuf::from(path);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .expect("workspace root");
    let bin_name = if cfg!(windows) {
        "factindex-cli.exe"
    } else {
        "factindex-cli"
    };
    let fallback = workspace_root.join("target").join("debug").join(bin_name);
    assert!(
        fallback.exists(),
        "factindex-cli binary not found at {}",
        fallback.display()
    );
    fallback
}

fn run(args: &[&str]) -> Output {
    let mut command = Command::new(cli_bin_path());
    for name in SEARCH_ENV {
        command.env_remove(name);
    }
    command.args(args).output().expect("run factindex-cli")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

#[test]
fn route_share_process_contract_prints_exact_url() {
    let output = run(&[
        "route",
        "share",
        "--query",
        "ai workflows",
        "--page",
        "2",
        "--category",
        "Work Style",
        "--tag1",
        "Approach > Iterative",
    ]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "/?query=ai+workflows&page=2&category=Work+Style&tag1=Approach+%3E+Iterative"
    );
}

#[test]
fn route_parse_process_contract_tolerates_malformed_page() {
    let output = run(&["route", "parse", "/?page=2.5&tag0=&tag0=Events&factId=card%3Aa"]);
    let json = stdout_json(&output);
    assert!(json["route"].get("page").is_none());
    assert_eq!(json["route"]["tag0"], serde_json::json!(["Events"]));
    assert_eq!(json["fact_id"], "card:a");
    assert_eq!(json["title"], "Fact Index");
}

#[test]
fn credentials_process_contract_reports_disabled_without_env() {
    let output = run(&["credentials"]);
    let json = stdout_json(&output);
    assert_eq!(json["enabled"], false);
    assert!(
        !String::from_utf8_lossy(&output.stdout).contains("api_key\":\""),
        "secrets must not be echoed"
    );
}

#[test]
fn search_process_contract_without_credentials_is_unavailable() {
    let output = run(&["search", "?query=rust"]);
    let json = stdout_json(&output);
    assert_eq!(json["pages"][0]["status"], "unavailable");
    assert_eq!(json["url"], "/?query=rust");
}

#[test]
fn suggest_and_trending_process_contract_are_empty_without_credentials() {
    let suggest = stdout_json(&run(&["suggest", "ship", "--limit", "3"]));
    assert_eq!(suggest["prefix"], "ship");
    assert_eq!(suggest["suggestions"], serde_json::json!([]));

    let trending = stdout_json(&run(&["trending"]));
    assert_eq!(trending, serde_json::json!([]));
}

#[test]
fn tags_toggle_process_contract_uses_snapshot_file() {
    let dir = tempdir().expect("tempdir");
    let snapshot = dir.path().join("facets.json");
    fs::write(
        &snapshot,
        r#"{"tags.lvl0": [{"value": "Events"}], "tags.lvl1": [{"value": "Events > Conference"}, {"value": "Events > Meetup"}]}"#,
    )
    .expect("write snapshot");

    let output = run(&[
        "tags",
        "toggle",
        "--snapshot",
        snapshot.to_str().expect("snapshot path"),
        "--url",
        "/?tag0=Events",
        "--child",
        "Events > Meetup",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["url"], "/?tag0=Events&tag1=Events+%3E+Conference");
    assert_eq!(json["groups"]["groups"][0]["parent"]["is_refined"], true);
}

#[test]
fn config_file_process_contract_sets_base_path() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("factindex.toml");
    fs::write(&config, "[routing]\nbase_path = \"/facts\"\n").expect("write config");

    let output = run(&[
        "--config",
        config.to_str().expect("config path"),
        "route",
        "share",
        "--query",
        "rust",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "/facts?query=rust");
}

#[test]
fn missing_config_file_process_contract_fails() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    let output = run(&["--config", missing.to_str().expect("path"), "session"]);
    assert!(!output.status.success());
}
