#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

#[allow(dead_code)]
pub const KEY: &str = "abcdef0123456789";

/// Create a `pingroute` command isolated from the caller's environment.
///
/// Runs inside `workdir` so that no stray `pingroute.toml` is picked up.
#[allow(dead_code)]
pub fn pingroute_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pingroute"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.current_dir(workdir);
    for var in [
        "PINGROUTE_CONFIG",
        "PINGROUTE_BASE_URL",
        "PINGROUTE_BUILD_DIR",
        "PINGROUTE_OUTPUT_FORMAT",
        "PINGROUTE_GOOGLE_ENDPOINT",
        "INDEXNOW_KEY",
        "GOOGLE_APPLICATION_CREDENTIALS",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a build directory whose routes manifest lists `pages`.
#[allow(dead_code)]
pub fn write_build(build_dir: &Path, pages: &[&str]) {
    let routes: Vec<_> = pages.iter().map(|page| json!({ "page": page })).collect();
    fs::create_dir_all(build_dir).unwrap();
    fs::write(
        build_dir.join("routes-manifest.json"),
        json!({ "version": 3, "staticRoutes": routes }).to_string(),
    )
    .unwrap();
}

/// The standard build used across tests: two submittable routes.
#[allow(dead_code)]
pub fn write_default_build(build_dir: &Path) {
    write_build(build_dir, &["/", "/about", "/blog/[slug]", "/_error"]);
}

/// A service-account file signed with the core crate's test key.
#[allow(dead_code)]
pub fn write_service_account(path: &Path, token_uri: &str) {
    let pem = fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../pingroute-core/tests/fixtures/test-key.pem"),
    )
    .expect("test key fixture");
    fs::write(
        path,
        json!({
            "type": "service_account",
            "client_email": "indexer@pingroute-test.iam.gserviceaccount.com",
            "private_key": pem,
            "token_uri": token_uri,
        })
        .to_string(),
    )
    .unwrap();
}
