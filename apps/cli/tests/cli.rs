use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PAGE: &str = "<html><head><title>Hi 👋</title></head>\
    <body><p>Hello 😀 World 🚀</p><script>var s = '😀';</script></body></html>";

struct Profile {
    dir: TempDir,
    config: PathBuf,
}

impl Profile {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("settings.json");
        let config = dir.path().join("demoji.toml");
        std::fs::write(
            &config,
            format!(
                "[storage]\nsettings_path = {:?}\n\n[logging]\nlevel = \"warn\"\n",
                settings.display().to_string()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("demoji").unwrap();
        cmd.current_dir(self.dir.path()).arg("--config").arg(&self.config);
        cmd
    }

    fn page(&self) -> PathBuf {
        let path = self.dir.path().join("page.html");
        std::fs::write(&path, PAGE).unwrap();
        path
    }
}

fn settings_json(dir: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(dir.join("settings.json")).unwrap()).unwrap()
}

#[test]
fn no_arguments_prints_help() {
    Command::cargo_bin("demoji")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn scrub_without_settings_leaves_page_untouched() {
    let profile = Profile::new();
    let page = profile.page();

    profile
        .cmd()
        .arg("scrub")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello 😀 World 🚀"));
}

#[test]
fn init_then_scrub_removes_emoji() {
    let profile = Profile::new();
    let page = profile.page();

    profile.cmd().args(["settings", "init"]).assert().success();
    assert_eq!(settings_json(profile.dir.path())["enabled"], true);

    profile
        .cmd()
        .arg("scrub")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Hi </title>"))
        .stdout(predicate::str::contains("<p>Hello  World </p>"))
        .stdout(predicate::str::contains("var s = '😀';"));
}

#[test]
fn text_format_prints_document_text() {
    let profile = Profile::new();
    let page = profile.page();
    profile.cmd().args(["settings", "set", "--enabled", "true", "--allow", "🚀"]).assert().success();

    profile
        .cmd()
        .arg("scrub")
        .arg(&page)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello  World 🚀"))
        .stdout(predicate::str::contains("<p>").not());
}

#[test]
fn notifications_reset_the_page_in_order() {
    let profile = Profile::new();
    let page = profile.page();

    profile
        .cmd()
        .arg("scrub")
        .arg(&page)
        .args(["--format", "text"])
        .args(["--notify", r#"{"action":"updateState","enabled":true}"#])
        .args(["--notify", r#"{"action":"ping"}"#])
        .args(["--notify", r#"{"action":"updateState","allowList":"😀"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello 😀 World "))
        .stdout(predicate::str::contains("🚀").not());

    assert!(
        !profile.dir.path().join("settings.json").exists(),
        "notifications are not persisted"
    );
}

#[test]
fn only_foreign_notifications_fail() {
    let profile = Profile::new();
    let page = profile.page();

    profile
        .cmd()
        .arg("scrub")
        .arg(&page)
        .args(["--notify", "not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No configuration change"));
}

#[test]
fn settings_set_and_show() {
    let profile = Profile::new();

    profile
        .cmd()
        .args(["settings", "set", "--block", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"blockList\": \"a\""));

    profile
        .cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled\": true"))
        .stdout(predicate::str::contains("\"allowList\": \"\""));

    let stored = settings_json(profile.dir.path());
    assert_eq!(stored["blockList"], "a");
    assert!(stored.get("enabled").is_none(), "only the changed key is written");
}

#[test]
fn settings_set_without_changes_fails() {
    let profile = Profile::new();
    profile
        .cmd()
        .args(["settings", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn missing_input_file_is_reported() {
    let profile = Profile::new();
    profile
        .cmd()
        .args(["scrub", "does-not-exist.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
