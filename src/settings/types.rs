use serde::Deserialize;
use std::path::PathBuf;

/// Contents of the optional `~/.sshc.toml` settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsFile {
	/// Path to the SSH client config. `~` is expanded.
	pub config_path: Option<String>,

	/// Use ANSI colors for highlights and errors.
	pub color: Option<bool>,

	/// Editor command for `sshc edit`. Overrides `$EDITOR`.
	pub editor: Option<String>,

	/// Default remote file for `sshc copy`.
	pub remote_path: Option<String>,

	/// ssh client used by `sshc copy`.
	pub ssh_program: Option<String>,
}

/// Values given on the command line. They take precedence over everything.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub config_path: Option<String>,

	/// `--color` can only switch colors on.
	pub color: bool,

	pub remote_path: Option<String>,
}

/// Effective settings for one invocation.
///
/// Passed explicitly to every operation instead of living in globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub config_path: PathBuf,
	pub color: bool,
	pub editor: String,
	pub remote_path: String,
	pub ssh_program: String,
}
