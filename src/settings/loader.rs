use crate::error::{Result, SshcError};
use crate::settings::types::{Overrides, Settings, SettingsFile};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "~/.ssh/config";
pub const DEFAULT_EDITOR: &str = "vim";
pub const DEFAULT_REMOTE_PATH: &str = "$HOME/.ssh/config";
pub const DEFAULT_SSH_PROGRAM: &str = "ssh";

/// Environment variable pointing at an alternative settings file.
pub const SETTINGS_ENV_VAR: &str = "SSHC_SETTINGS";

/// Location of the user settings file (`$SSHC_SETTINGS` or `~/.sshc.toml`).
///
/// `None` when neither is available: without a home directory there is no
/// settings file to read.
pub fn settings_path(env_path: Option<PathBuf>, home: Option<&Path>) -> Option<PathBuf> {
	env_path.or_else(|| home.map(|home| home.join(".sshc.toml")))
}

/// Parse a settings file. A missing file yields `None`.
pub fn parse_settings_file(path: &Path) -> Result<Option<SettingsFile>> {
	if !path.exists() {
		return Ok(None);
	}

	let content =
		std::fs::read_to_string(path).map_err(|source| SshcError::SettingsReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_settings_str(&content, path).map(Some)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(content: &str, path: &Path) -> Result<SettingsFile> {
	toml::from_str(content).map_err(|source| SshcError::SettingsParseError {
		path: path.to_path_buf(),
		source,
	})
}

/// Expand a leading `~` against `home`.
///
/// Only `~` and `~/...` are expanded; other paths are returned unchanged.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> Result<PathBuf> {
	let rest = match path.strip_prefix('~') {
		Some("") => "",
		Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
		_ => return Ok(PathBuf::from(path)),
	};

	let home = home.ok_or(SshcError::HomeDirectoryNotFound)?;
	Ok(home.join(rest))
}

/// Combine command-line overrides, the settings file, the environment and
/// defaults, in that order of precedence.
pub fn resolve_settings(
	file: SettingsFile,
	overrides: &Overrides,
	editor_env: Option<String>,
	home: Option<&Path>,
) -> Result<Settings> {
	let config_path = overrides
		.config_path
		.clone()
		.or(file.config_path)
		.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

	let editor = file
		.editor
		.or(editor_env)
		.filter(|editor| !editor.trim().is_empty())
		.unwrap_or_else(|| DEFAULT_EDITOR.to_string());

	Ok(Settings {
		config_path: expand_tilde(&config_path, home)?,
		color: overrides.color || file.color.unwrap_or(false),
		editor,
		remote_path: overrides
			.remote_path
			.clone()
			.or(file.remote_path)
			.unwrap_or_else(|| DEFAULT_REMOTE_PATH.to_string()),
		ssh_program: file
			.ssh_program
			.unwrap_or_else(|| DEFAULT_SSH_PROGRAM.to_string()),
	})
}

/// Load the effective settings for this process.
pub fn load_settings(overrides: &Overrides) -> Result<Settings> {
	let home = dirs::home_dir();
	let file = match settings_path(
		std::env::var_os(SETTINGS_ENV_VAR).map(PathBuf::from),
		home.as_deref(),
	) {
		Some(path) => {
			debug!(path = %path.display(), "loading settings");
			parse_settings_file(&path)?.unwrap_or_default()
		}
		None => SettingsFile::default(),
	};

	resolve_settings(
		file,
		overrides,
		std::env::var("EDITOR").ok(),
		home.as_deref(),
	)
}
