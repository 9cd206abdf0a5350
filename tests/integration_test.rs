#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const SAMPLE_CONFIG: &str = "# personal hosts
Host web1 web1.example.com
    HostName 10.0.1.10
    User alice
    IdentityFile ~/.ssh/id_rsa

Host *.internal
    User root

Host db
    HostName 10.0.2.20
    User postgres
    User dba
    Port 5432
";

/// A temp dir holding an SSH config and an isolated (absent) settings file.
struct Fixture {
	dir: tempfile::TempDir,
}

impl Fixture {
	fn new(config: &str) -> Self {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("config"), config).unwrap();
		Self { dir }
	}

	fn path(&self, name: &str) -> PathBuf {
		self.dir.path().join(name)
	}

	fn cmd(&self) -> assert_cmd::Command {
		let mut cmd = assert_cmd::Command::cargo_bin("sshc").unwrap();
		cmd.env("SSHC_SETTINGS", self.path("sshc.toml"))
			.arg("--config")
			.arg(self.path("config"));
		cmd
	}
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	assert_cmd::Command::cargo_bin("sshc")
		.unwrap()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("swiss-army knife"));
}

#[test]
fn test_version_flag() {
	assert_cmd::Command::cargo_bin("sshc")
		.unwrap()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("sshc"));
}

#[test]
fn test_no_args_shows_help() {
	assert_cmd::Command::cargo_bin("sshc")
		.unwrap()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// get tests
// ============================================================================

#[test]
fn test_get_prints_block_verbatim() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["get", "web1.example.com"])
		.assert()
		.success()
		.stdout(
			"Host web1 web1.example.com\n    HostName 10.0.1.10\n    User alice\n    IdentityFile ~/.ssh/id_rsa\n\n",
		);
}

#[test]
fn test_get_json() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["get", "db", "--json"])
		.assert()
		.success()
		.stdout(
			"{\n  \"HostName\": \"10.0.2.20\",\n  \"Port\": \"5432\",\n  \"User\": \"dba\"\n}\n",
		);
}

#[test]
fn test_get_json_output_alias() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["get", "web1", "--json-output"])
		.assert()
		.success()
		.stdout(predicate::str::contains("\"IdentityFile\": \"~/.ssh/id_rsa\""));
}

#[test]
fn test_get_wildcard_block_is_not_a_match() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["get", "cache.internal"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("No concrete host definition"));
}

#[test]
fn test_get_missing_config() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	assert_cmd::Command::cargo_bin("sshc")
		.unwrap()
		.env("SSHC_SETTINGS", fixture.path("sshc.toml"))
		.args(["--config"])
		.arg(fixture.path("nope"))
		.args(["get", "web1"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("SSH config not found"));
}

#[test]
fn test_get_malformed_config() {
	let fixture = Fixture::new("User root\nHost web1\n");

	fixture
		.cmd()
		.args(["get", "web1"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_error_is_plain_without_color() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["get", "ghost"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_error_is_red_with_color() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["--color", "get", "ghost"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("\u{1b}[31m"));
}

// ============================================================================
// hosts tests
// ============================================================================

#[test]
fn test_hosts_lists_every_pattern() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.arg("hosts")
		.assert()
		.success()
		.stdout("web1\nweb1.example.com\n*.internal\ndb\n");
}

#[test]
fn test_remotes_alias() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.arg("remotes")
		.assert()
		.success()
		.stdout(predicate::str::contains("*.internal"));
}

// ============================================================================
// find tests
// ============================================================================

#[test]
fn test_find_prints_matching_blocks() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["find", r"10\.0\.2\."])
		.assert()
		.success()
		.stdout(predicate::str::starts_with("Host db\n"))
		.stdout(predicate::str::contains("web1").not());
}

#[test]
fn test_find_ignore_case() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["find", "POSTGRES"])
		.assert()
		.success()
		.stdout("");

	fixture
		.cmd()
		.args(["grep", "-i", "POSTGRES"])
		.assert()
		.success()
		.stdout(predicate::str::contains("User postgres"));
}

#[test]
fn test_find_highlights_with_color() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["--color", "search", "postgres"])
		.assert()
		.success()
		.stdout(predicate::str::contains("\u{1b}[35mpostgres\u{1b}[0m"));
}

#[test]
fn test_find_invalid_regex() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.args(["find", "[invalid"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid search pattern"));
}

// ============================================================================
// edit tests (Unix only - use true/false as the editor)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_edit_runs_editor() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture.cmd().env("EDITOR", "true").arg("edit").assert().success();
}

#[cfg(unix)]
#[test]
fn test_edit_editor_failure() {
	let fixture = Fixture::new(SAMPLE_CONFIG);

	fixture
		.cmd()
		.env("EDITOR", "false")
		.arg("e")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Editor failed"));
}

#[cfg(unix)]
#[test]
fn test_edit_settings_editor_wins_over_env() {
	let fixture = Fixture::new(SAMPLE_CONFIG);
	fs::write(fixture.path("sshc.toml"), "editor = \"true\"\n").unwrap();

	fixture.cmd().env("EDITOR", "false").arg("edit").assert().success();
}

// ============================================================================
// copy tests (Unix only - a fake ssh runs the remote instruction locally)
// ============================================================================

#[cfg(unix)]
fn install_fake_ssh(fixture: &Fixture) {
	use std::os::unix::fs::PermissionsExt;

	let script = fixture.path("fake-ssh");
	fs::write(&script, "#!/bin/sh\nshift 2\nexec sh -c \"$1\"\n").unwrap();
	fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

	fs::write(
		fixture.path("sshc.toml"),
		format!("ssh-program = \"{}\"\n", script.display()),
	)
	.unwrap();
}

#[cfg(unix)]
fn remote_file(fixture: &Fixture, name: &str) -> PathBuf {
	let path = fixture.path(name);
	fs::write(&path, "Host existing\n  User keep\n").unwrap();
	path
}

#[cfg(unix)]
fn copy_args(alias: &str, remote: &Path) -> Vec<String> {
	vec![
		"copy".to_string(),
		alias.to_string(),
		"deploy@example.com".to_string(),
		"--remote-path".to_string(),
		remote.to_string_lossy().to_string(),
	]
}

#[cfg(unix)]
#[test]
fn test_copy_appends_block_to_remote_file() {
	let fixture = Fixture::new(SAMPLE_CONFIG);
	install_fake_ssh(&fixture);
	let remote = remote_file(&fixture, "remote_config");

	fixture.cmd().args(copy_args("db", &remote)).assert().success();

	assert_eq!(
		fs::read_to_string(&remote).unwrap(),
		"Host existing\n  User keep\nHost db\n    HostName 10.0.2.20\n    User postgres\n    User dba\n    Port 5432\n"
	);
}

#[cfg(unix)]
#[test]
fn test_copy_path_metacharacters_are_inert() {
	let fixture = Fixture::new(SAMPLE_CONFIG);
	install_fake_ssh(&fixture);
	let remote = fixture.path("remote; touch pwned");

	fixture.cmd().args(copy_args("db", &remote)).assert().success();

	assert!(remote.exists());
	assert!(!Path::new("pwned").exists());
	assert!(!fixture.path("pwned").exists());
}

#[cfg(unix)]
#[test]
fn test_copy_unknown_alias() {
	let fixture = Fixture::new(SAMPLE_CONFIG);
	install_fake_ssh(&fixture);
	let remote = remote_file(&fixture, "remote_config");

	fixture
		.cmd()
		.args(copy_args("ghost", &remote))
		.assert()
		.failure()
		.stderr(predicate::str::contains("ghost"));

	assert_eq!(
		fs::read_to_string(&remote).unwrap(),
		"Host existing\n  User keep\n"
	);
}

#[cfg(unix)]
#[test]
fn test_copy_remote_failure_is_reported() {
	let fixture = Fixture::new(SAMPLE_CONFIG);
	install_fake_ssh(&fixture);
	let remote = fixture.path("missing-dir/config");

	fixture
		.cmd()
		.args(copy_args("web1", &remote))
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to copy 'web1'"))
		.stderr(predicate::str::contains("non-zero status"));
}

#[cfg(unix)]
#[test]
fn test_copy_unsafe_shell_warns() {
	let fixture = Fixture::new(SAMPLE_CONFIG);
	// A stand-in that accepts the command without running it.
	fs::write(fixture.path("sshc.toml"), "ssh-program = \"true\"\n").unwrap();

	fixture
		.cmd()
		.args(["copy-def", "db", "deploy@example.com", "--unsafe-shell"])
		.assert()
		.success()
		.stderr(predicate::str::contains("without escaping"));
}
