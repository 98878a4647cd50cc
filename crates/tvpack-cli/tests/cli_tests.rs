//! End-to-end tests for the `tvpack` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tvpack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tvpack").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TVPACK_WEBOS__SDK_COMMAND");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project laid out with the default configuration paths.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "tvpack.toml",
        r#"
[project]
name = "Demo"
version = "1.2.3"
content_src = "content.html"
"#,
    );
    write(root, "www/content.html", "<h1>demo</h1>");
    write(root, "www/js/app.js", "start();");
    write(
        root,
        "platforms/orsay/repo/www/config.xml",
        "<widget><name>{{name}}</name><ver>{{version}}</ver>\
         <res>{{resWidth}}x{{resHeight}}</res></widget>",
    );
    dir
}

#[test]
fn help_lists_pipeline_commands() {
    let dir = TempDir::new().unwrap();
    tvpack(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("prepare"))
        .stdout(predicate::str::contains("package"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    tvpack(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_platform_is_usage_error() {
    let dir = TempDir::new().unwrap();
    tvpack(dir.path())
        .args(["prepare", "--platform", "tizen"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tizen"));
}

#[test]
fn orsay_prepare_non_interactive() {
    let dir = project();
    let root = dir.path();

    tvpack(root)
        .args(["--non-interactive", "prepare", "--platform", "orsay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prepared Demo 1.0203"));

    let dest = root.join("platforms/orsay/www");
    assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "<h1>demo</h1>");
    assert!(!dest.join("content.html").exists());
    assert!(dest.join("js/app.js").exists());

    let config_xml = fs::read_to_string(dest.join("config.xml")).unwrap();
    assert!(config_xml.contains("<name>Demo</name>"));
    assert!(config_xml.contains("<ver>1.0203</ver>"));
    assert!(config_xml.contains("<res>960x540</res>"));

    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("platforms/userconf.json")).unwrap())
            .unwrap();
    assert_eq!(state["orsay"]["name"], "Demo");
}

#[test]
fn flags_override_configured_paths() {
    let dir = project();
    let root = dir.path();

    tvpack(root)
        .args([
            "-y",
            "prepare",
            "-p",
            "orsay",
            "--dest",
            "out/orsay",
            "--state-file",
            "state/tvpack.json",
        ])
        .assert()
        .success();

    assert!(root.join("out/orsay/index.html").exists());
    assert!(root.join("state/tvpack.json").exists());
    assert!(!root.join("platforms/orsay/www").exists());
}

#[test]
fn orsay_package_is_unsupported() {
    let dir = project();
    tvpack(dir.path())
        .args(["-y", "package", "--platform", "orsay"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn webos_package_without_sdk_fails_preflight() {
    let dir = project();
    tvpack(dir.path())
        .env("TVPACK_WEBOS__SDK_COMMAND", "tvpack-missing-sdk-xyz")
        .args(["-y", "package", "--platform", "webos"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("preflight"))
        .stderr(predicate::str::contains("tvpack-missing-sdk-xyz"));
}

#[test]
fn invalid_webos_name_fails_validation() {
    let dir = project();
    write(
        dir.path(),
        "tvpack.toml",
        "[project]\nname = \"my-app\"\n",
    );
    tvpack(dir.path())
        .args(["-y", "prepare", "--platform", "webos"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuring"));
    assert!(!dir.path().join("platforms/webos/www").exists());
}

#[test]
fn corrupt_state_file_is_configuration_error() {
    let dir = project();
    write(dir.path(), "platforms/userconf.json", "[1, 2]");
    tvpack(dir.path())
        .args(["-y", "prepare", "--platform", "webos"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn orsay_prepare_survives_corrupt_state_file() {
    let dir = project();
    write(dir.path(), "platforms/userconf.json", "[1, 2]");
    tvpack(dir.path())
        .args(["-y", "prepare", "--platform", "orsay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prepared Demo 1.0203"))
        .stdout(predicate::str::contains("corrupt"));
    assert_eq!(
        fs::read_to_string(dir.path().join("platforms/userconf.json")).unwrap(),
        "[1, 2]"
    );
}

#[test]
fn init_writes_local_config_once() {
    let dir = TempDir::new().unwrap();
    tvpack(dir.path()).arg("init").assert().success();

    let written = fs::read_to_string(dir.path().join("tvpack.toml")).unwrap();
    assert!(written.contains("[webos]"));
    assert!(written.contains("sdk_command"));

    tvpack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn config_get_reads_file_and_environment() {
    let dir = project();
    tvpack(dir.path())
        .args(["config", "get", "project.content_src"])
        .assert()
        .success()
        .stdout(predicate::str::diff("content.html\n"));

    tvpack(dir.path())
        .env("TVPACK_WEBOS__PROFILE_NAME", "release")
        .args(["config", "get", "webos.profile_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("release"));
}

#[test]
fn config_get_unknown_key() {
    let dir = project();
    tvpack(dir.path())
        .args(["config", "get", "webos.nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn missing_explicit_config_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    tvpack(dir.path())
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn completions_for_bash() {
    let dir = TempDir::new().unwrap();
    tvpack(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tvpack"));
}

#[test]
fn no_color_env_accepts_conventional_values() {
    let dir = project();
    for value in ["1", "true", "0", ""] {
        tvpack(dir.path())
            .env("NO_COLOR", value)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("tvpack.toml"));
    }
}
