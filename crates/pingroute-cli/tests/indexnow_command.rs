#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{KEY, pingroute_cmd, write_build, write_default_build};

#[tokio::test]
async fn dry_run_prints_urls_without_requests() -> anyhow::Result<()> {
    let dir = tempdir()?;
    write_default_build(&dir.path().join(".next"));
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    pingroute_cmd(dir.path())
        .args(["indexnow", "--base-url", "https://ex.com", "--key", KEY, "--dry-run"])
        .args(["--endpoint", &server.uri(), "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 URLs would be submitted"))
        .stdout(predicate::str::contains("  https://ex.com/about"));
    Ok(())
}

#[tokio::test]
async fn submits_payload_to_every_endpoint() -> anyhow::Result<()> {
    let dir = tempdir()?;
    write_default_build(&dir.path().join(".next"));

    let expected = json!({
        "host": "ex.com",
        "key": KEY,
        "keyLocation": format!("https://ex.com/{KEY}.txt"),
        "urlList": ["https://ex.com", "https://ex.com/about"],
    });
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    for server in [&first, &second] {
        Mock::given(method("POST"))
            .and(path("/indexnow"))
            .and(body_json(expected.clone()))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(server)
            .await;
    }

    let first_endpoint = format!("{}/indexnow", first.uri());
    let second_endpoint = format!("{}/indexnow", second.uri());
    let output = pingroute_cmd(dir.path())
        .env("PINGROUTE_BASE_URL", "https://ex.com")
        .env("INDEXNOW_KEY", KEY)
        .args(["indexnow", "-f", "json"])
        .args(["--endpoint", &first_endpoint, "--endpoint", &second_endpoint])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output)?;
    assert_eq!(report["urls"], json!(["https://ex.com", "https://ex.com/about"]));
    assert_eq!(report["dry_run"], json!(false));
    assert_eq!(report["responses"][&first_endpoint]["status"], json!(202));
    assert_eq!(report["responses"][&second_endpoint]["ok"], json!(true));
    Ok(())
}

#[tokio::test]
async fn rejected_endpoint_exits_with_network_code() -> anyhow::Result<()> {
    let dir = tempdir()?;
    write_default_build(&dir.path().join(".next"));
    let accepting = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&accepting)
        .await;
    let rejecting = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Key not valid"))
        .mount(&rejecting)
        .await;

    pingroute_cmd(dir.path())
        .args(["indexnow", "--base-url", "https://ex.com", "--key", KEY, "-f", "text"])
        .args(["--endpoint", &accepting.uri(), "--endpoint", &rejecting.uri()])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("403"))
        .stdout(predicate::str::contains("Key not valid"))
        .stderr(predicate::str::contains("1 of 2 IndexNow endpoints"));
    Ok(())
}

#[test]
fn missing_key_is_usage_error() -> anyhow::Result<()> {
    let dir = tempdir()?;

    pingroute_cmd(dir.path())
        .args(["indexnow", "--base-url", "https://ex.com"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing IndexNow key"));
    Ok(())
}

#[test]
fn malformed_key_is_usage_error() -> anyhow::Result<()> {
    let dir = tempdir()?;

    pingroute_cmd(dir.path())
        .args(["indexnow", "--base-url", "https://ex.com", "--key", "bad key!"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid IndexNow key"));
    Ok(())
}

#[test]
fn missing_base_url_is_usage_error() -> anyhow::Result<()> {
    let dir = tempdir()?;

    pingroute_cmd(dir.path())
        .args(["indexnow", "--key", KEY])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing base URL"));
    Ok(())
}

#[test]
fn empty_build_reports_every_endpoint_as_unsent() -> anyhow::Result<()> {
    let dir = tempdir()?;
    write_build(&dir.path().join(".next"), &["/_error", "/blog/[slug]"]);

    let output = pingroute_cmd(dir.path())
        .args(["indexnow", "--base-url", "https://ex.com", "--key", KEY])
        .args(["--endpoint", "http://127.0.0.1:9/a", "--endpoint", "http://127.0.0.1:9/b"])
        .args(["-f", "json"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("no URLs to submit"))
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output)?;
    let unsent = json!({ "status": 0, "ok": false, "body": "no URLs to submit" });
    assert_eq!(
        report["responses"],
        json!({ "http://127.0.0.1:9/a": unsent, "http://127.0.0.1:9/b": unsent })
    );
    Ok(())
}
