use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home, config and state directories plus one project directory
struct Sandbox {
    home: TempDir,
    project: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let project = home.path().join("projects/api");
        fs::create_dir_all(&project).unwrap();
        Self { home, project }
    }

    fn desktop(&self) -> Command {
        let mut cmd = Command::cargo_bin("desktop").unwrap();
        cmd.env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join("config"))
            .env("XDG_STATE_HOME", self.home.path().join("state"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .current_dir(&self.project);
        cmd
    }

    fn store_file(&self) -> PathBuf {
        self.home.path().join("state/desktop/desktop.toml")
    }

    fn write_desktopfile(&self, contents: &str) {
        fs::write(self.project.join("Desktopfile"), contents).unwrap();
    }

    fn register(&self, name: &str) {
        self.desktop()
            .args(["new", name, "API service"])
            .assert()
            .success();
    }
}

fn script_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("desktop").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workspace bookmarks"));
}

#[test]
fn test_go_help() {
    let mut cmd = Command::cargo_bin("desktop").unwrap();
    cmd.args(["go", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults to 'default'"));
}

#[test]
fn test_new_registers_workspace_and_template() {
    let sandbox = Sandbox::new();
    sandbox
        .desktop()
        .args(["new", "api", "API service"])
        .assert()
        .success()
        .stdout(predicate::str::contains("workspace 'api'"));

    let desktopfile = fs::read_to_string(sandbox.project.join("Desktopfile")).unwrap();
    assert!(desktopfile.contains("configuration :default do"));

    let store = fs::read_to_string(sandbox.store_file()).unwrap();
    assert!(store.contains("name = \"api\""));
    assert!(store.contains("description = \"API service\""));

    sandbox
        .desktop()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("api API service"))
        .stdout(predicate::str::contains("last used just now"));
}

#[test]
fn test_new_keeps_existing_desktopfile() {
    let sandbox = Sandbox::new();
    sandbox.write_desktopfile("configuration :mine do\nend\n");
    sandbox.register("api");

    let desktopfile = fs::read_to_string(sandbox.project.join("Desktopfile")).unwrap();
    assert_eq!(desktopfile, "configuration :mine do\nend\n");
}

#[test]
fn test_new_duplicate_name_fails() {
    let sandbox = Sandbox::new();
    sandbox.register("api");

    sandbox
        .desktop()
        .args(["new", "api", "again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_list_empty() {
    let sandbox = Sandbox::new();
    sandbox
        .desktop()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workspaces found"));
}

#[test]
fn test_script_renders_default_variant() {
    let sandbox = Sandbox::new();
    sandbox.write_desktopfile(
        r#"
configuration :default do
  env 'b', '2'
  env 'a', '1'
  alias_cmd 'll', 'ls -la'
  cmd "echo A"
  echo "B"
  cmd "echo C"
  os :linux, :macos, :windows do
    cmd 'echo everywhere'
  end
  os :plan9 do
    cmd 'echo nowhere'
  end
end

configuration :other do
  env 'OTHER', 'yes'
end
"#,
    );
    sandbox.register("api");

    let output = sandbox
        .desktop()
        .args(["script", "api"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = script_lines(&output);

    assert_eq!(lines[0], "if [ -f /etc/profile ]; then . /etc/profile; fi");
    assert_eq!(lines[5], "export DESKTOP_WORKSPACE='api'");
    assert_eq!(lines[6], "export DESKTOP_CONFIGURATION='default'");
    assert!(lines[7].starts_with("export PS1="));
    assert_eq!(
        &lines[8..],
        [
            r#"export a="1""#,
            r#"export b="2""#,
            "alias ll='ls -la'",
            "echo A",
            "echo 'B'",
            "echo C",
            "echo everywhere",
        ]
    );
}

#[test]
fn test_script_named_variant() {
    let sandbox = Sandbox::new();
    sandbox.write_desktopfile(
        "configuration :default do\n  env 'MODE', 'dev'\nend\nconfiguration :ci do\n  env 'MODE', 'ci'\nend\n",
    );
    sandbox.register("api");

    sandbox
        .desktop()
        .args(["script", "api", "ci"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"export MODE="ci""#))
        .stdout(predicate::str::contains(r#"export MODE="dev""#).not());
}

#[test]
fn test_script_default_variant_from_config() {
    let sandbox = Sandbox::new();
    sandbox.write_desktopfile("configuration :work do\n  env 'AT', 'work'\nend\n");
    sandbox.register("api");
    let config_dir = sandbox.home.path().join("config/desktop");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "default_variant = \"work\"\n").unwrap();

    sandbox
        .desktop()
        .args(["script", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"export AT="work""#));
}

#[test]
fn test_script_without_desktopfile() {
    let sandbox = Sandbox::new();
    sandbox.register("api");
    fs::remove_file(sandbox.project.join("Desktopfile")).unwrap();

    let output = sandbox
        .desktop()
        .args(["script", "api", "anything"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = script_lines(&output);

    assert_eq!(lines.len(), 8);
    assert_eq!(lines[6], "export DESKTOP_CONFIGURATION='anything'");
}

#[test]
fn test_script_missing_variant() {
    let sandbox = Sandbox::new();
    sandbox.register("api");

    sandbox
        .desktop()
        .args(["script", "api", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no configuration named \"nope\""));
}

#[test]
fn test_script_missing_workspace() {
    let sandbox = Sandbox::new();
    sandbox
        .desktop()
        .args(["script", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no workspace named \"ghost\""));
}

#[test]
fn test_script_reports_dsl_errors() {
    let sandbox = Sandbox::new();
    sandbox.write_desktopfile("configuration :default do\n  system 'rm -rf /'\nend\n");
    sandbox.register("api");

    sandbox
        .desktop()
        .args(["script", "api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Desktopfile:2:3: unknown statement `system`"));
}

#[test]
fn test_go_missing_variant_writes_nothing() {
    let sandbox = Sandbox::new();
    sandbox.register("api");
    let scripts = sandbox.home.path().join("tmp");
    fs::create_dir_all(&scripts).unwrap();
    let before = fs::read_to_string(sandbox.store_file()).unwrap();

    sandbox
        .desktop()
        .env("TMPDIR", &scripts)
        .args(["go", "api", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no configuration named \"nope\""));

    assert_eq!(count_files(&scripts), 0);
    assert_eq!(fs::read_to_string(sandbox.store_file()).unwrap(), before);
}

#[cfg(unix)]
#[test]
fn test_go_with_missing_shell_reports_launch_error() {
    let sandbox = Sandbox::new();
    sandbox.register("api");
    let config_dir = sandbox.home.path().join("config/desktop");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "shell = \"/nonexistent/desktop-shell\"\n",
    )
    .unwrap();
    let scripts = sandbox.home.path().join("tmp");
    fs::create_dir_all(&scripts).unwrap();
    let before = fs::read_to_string(sandbox.store_file()).unwrap();

    sandbox
        .desktop()
        .env("TMPDIR", &scripts)
        .args(["go", "api"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Activating"))
        .stderr(predicate::str::contains("failed to launch shell"));

    // The init script was written and last-used was recorded before the launch.
    assert_eq!(count_files(&scripts), 1);
    assert_ne!(fs::read_to_string(sandbox.store_file()).unwrap(), before);
}

#[test]
fn test_check_lists_configurations() {
    let sandbox = Sandbox::new();
    sandbox.write_desktopfile(
        "configuration :default do\n  env 'A', '1'\n  cmd 'x'\nend\nconfiguration :ci do\nend\n",
    );
    sandbox.register("api");

    sandbox
        .desktop()
        .args(["check", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default 1 variable(s), 0 alias(es), 1 command(s)"))
        .stdout(predicate::str::contains("ci 0 variable(s)"))
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_tags_workflow() {
    let sandbox = Sandbox::new();
    sandbox.register("api");

    sandbox
        .desktop()
        .args(["tags", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));

    sandbox
        .desktop()
        .args(["tags", "new", "rust"])
        .assert()
        .success();

    sandbox
        .desktop()
        .args(["tags", "new", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sandbox
        .desktop()
        .args(["tags", "add", "api", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("workspace 'api' with 'rust'"));

    sandbox
        .desktop()
        .args(["tags", "add", "api", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no tag named \"missing\""));

    sandbox
        .desktop()
        .args(["tags", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rust 1 workspace(s)"));

    sandbox
        .desktop()
        .args(["tags", "show", "--tag", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api"));

    sandbox
        .desktop()
        .args(["tags", "show", "-w", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tag rust"));
}

#[test]
fn test_tags_show_needs_one_target() {
    let sandbox = Sandbox::new();
    sandbox
        .desktop()
        .args(["tags", "show", "--tag", "a", "--workspace", "b"])
        .assert()
        .failure();
}
