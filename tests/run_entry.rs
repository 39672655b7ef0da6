//! Command line entry flow tests.
//!
//! These tests drive `buildboard_lib::run` the way the binary does:
//! 1. Success: the fetch lands, then `--page` is applied
//! 2. Unreachable host: an empty page is rendered and the run still succeeds
//! 3. Out of range `--page`: reported, first page kept
//! 4. `--rows-per-page`: applied before mount, checked against the options
//! 5. Configuration: an unknown route key is a configuration error

use buildboard_lib::cli::Cli;
use buildboard_lib::error::AppError;
use buildboard_lib::models::RowsPerPage;
use clap::Parser;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn builds_json(n: i64) -> Value {
    (0..n)
        .map(|id| {
            json!({
                "build_id": id,
                "git_repository_url": format!("https://github.com/acme/worker-{}.git", id),
                "commit_hash": format!("{:012x}", id * 31),
                "build_status": "success",
            })
        })
        .collect()
}

/// Config file with the given document, kept alive by the returned handle.
fn config_file(document: Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", document).unwrap();
    file
}

fn cli(config: &NamedTempFile, host: &str, extra: &[&str]) -> Cli {
    let mut args = vec![
        "buildboard".to_string(),
        "--config".to_string(),
        config.path().display().to_string(),
        "--api-host".to_string(),
        host.to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    Cli::try_parse_from(args).unwrap()
}

/// Test 1: fetch, then go to the requested page
#[tokio::test]
async fn test_run_applies_page_after_fetch() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/builds/");
            then.status(200).json_body(builds_json(12));
        })
        .await;
    let config = config_file(json!({}));

    let page = buildboard_lib::run(cli(&config, &server.base_url(), &["--page", "2"]))
        .await
        .unwrap();

    mock.assert_hits_async(1).await;
    assert_eq!(page.total, 12);
    assert_eq!(page.page, 1);
    let ids: Vec<i64> = page.rows.iter().map(|b| b.build_id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8, 9]);
}

/// Test 2 & 3: unreachable host renders empty; an impossible page is not fatal
#[tokio::test]
async fn test_run_unreachable_host_succeeds_empty() {
    let config = config_file(json!({ "timeout_ms": 2000 }));

    let page = buildboard_lib::run(cli(&config, "http://127.0.0.1:1", &["--page", "3"]))
        .await
        .unwrap();

    assert_eq!(page.total, 0);
    assert!(page.rows.is_empty());
    assert_eq!(page.page, 0);
    assert_eq!(page.label, "0-0 of 0");
}

/// Test 4: a page size that is not offered is rejected before any request
#[tokio::test]
async fn test_run_rejects_unoffered_rows_per_page() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/builds/");
            then.status(200).json_body(builds_json(3));
        })
        .await;
    let config = config_file(json!({}));

    let err = buildboard_lib::run(cli(&config, &server.base_url(), &["--rows-per-page", "7"]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidInput { .. }));
    assert!(!err.is_config());
    mock.assert_hits_async(0).await;
}

/// Test 4: an offered page size is in effect for the rendered page
#[tokio::test]
async fn test_run_rows_per_page_all() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/builds/");
            then.status(200).json_body(builds_json(12));
        })
        .await;
    let config = config_file(json!({}));

    let page = buildboard_lib::run(cli(&config, &server.base_url(), &["--rows-per-page", "all"]))
        .await
        .unwrap();

    assert_eq!(page.rows_per_page, RowsPerPage::All);
    assert_eq!(page.rows.len(), 12);
    assert_eq!(page.page_count, 1);
}

/// Test 5: routes without a builds entry fail as a configuration error
#[tokio::test]
async fn test_run_unknown_route_key_is_config_error() {
    let config = config_file(json!({ "routes": { "artifacts": "artifacts/" } }));

    let err = buildboard_lib::run(cli(&config, "http://localhost:8000", &[]))
        .await
        .unwrap_err();

    assert!(err.is_config());
    assert!(err.to_string().contains("builds"));
}
