//! Invocation settings for sshc.
//!
//! This module handles:
//! - Parsing the optional `~/.sshc.toml` settings file
//! - Merging command-line overrides, settings file, environment and defaults
//! - `~` expansion of the SSH config path

pub mod loader;
pub mod types;

pub use loader::{
	DEFAULT_CONFIG_PATH, DEFAULT_EDITOR, DEFAULT_REMOTE_PATH, DEFAULT_SSH_PROGRAM,
	SETTINGS_ENV_VAR, expand_tilde, load_settings, parse_settings_file, parse_settings_str,
	resolve_settings, settings_path,
};
pub use types::{Overrides, Settings, SettingsFile};
