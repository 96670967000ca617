//! Smoke tests for the dashboards_bundler binary.

mod common;

use assert_cmd::{Command, assert::OutputAssertExt};
use predicates::prelude::*;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bundler_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dashboards_bundler").unwrap();
    cmd.env_remove("DASHBOARD_SERVER_URL")
        .env_remove("DASHBOARD_SERVER_NO_SSL_VERIFY")
        .env_remove("JUPYTER_NOTEBOOK_DIR");
    cmd
}

#[test]
fn lists_registered_bundlers() {
    bundler_cmd()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboards_local_deploy"))
        .stdout(predicate::str::contains("dashboards_php_download"))
        .stdout(predicate::str::contains("dashboards_server_upload"))
        .stdout(predicate::str::contains("Jupyter Dashboards Server bundle (.zip)"));
}

#[test]
fn unknown_bundler_fails() {
    bundler_cmd()
        .args(["--bundler", "dashboards_nope", "--notebook", "a.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown bundler: dashboards_nope"));
}

#[test]
fn upload_without_server_fails() {
    bundler_cmd()
        .args(["-b", "dashboards_server_upload", "-n", "no_imports.ipynb", "--notebook-dir"])
        .arg(common::resources())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dashboard server configured"))
        .stderr(predicate::str::contains("(500)"));
}

#[test]
fn download_writes_output_file() {
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("download.ipynb");

    bundler_cmd()
        .args(["-b", "dashboards_server_download", "-n", "no_imports.ipynb", "--notebook-dir"])
        .arg(common::resources())
        .arg("--output")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"filename="no_imports.ipynb""#));

    let written = std::fs::read(&target).unwrap();
    let original = std::fs::read(common::resources().join("no_imports.ipynb")).unwrap();
    assert_eq!(written, original);
}

#[test]
fn warns_when_tls_verification_is_off() {
    bundler_cmd()
        .env("DASHBOARD_SERVER_NO_SSL_VERIFY", "yes")
        .env("RUST_LOG", "warn")
        .arg("--list")
        .assert()
        .success()
        .stderr(predicate::str::contains("SSL verification disabled"));
}

#[tokio::test]
async fn failed_upload_leaves_no_temporary_files() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;
    let tmp_root = tempfile::tempdir().unwrap();

    let mut cmd = bundler_cmd();
    cmd.env("DASHBOARD_SERVER_URL", mock_server.uri())
        .env("TMPDIR", tmp_root.path())
        .args(["-b", "dashboards_server_upload", "-n", "some.ipynb", "--notebook-dir"])
        .arg(common::resources());
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("(403)"));
    assert_eq!(std::fs::read_dir(tmp_root.path()).unwrap().count(), 0);
}
