use std::path::PathBuf;

/// Library-level structured errors for sshc.
///
/// Messages are plain text. Coloring happens only at the output boundary
/// (see [`crate::output::render_error`]).
#[derive(Debug, thiserror::Error)]
pub enum SshcError {
	#[error("SSH config not found at path {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read SSH config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Malformed SSH config at line {line}: {message}")]
	Parse { line: usize, message: String },

	#[error("No concrete host definition matches '{alias}'")]
	NoMatch { alias: String },

	#[error("Invalid search pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to start process: {command}")]
	ProcessFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Process exited with non-zero status: {command} (exit code: {exit_code})")]
	ProcessNonZeroExit { command: String, exit_code: i32 },

	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to serialize host fields as JSON")]
	Json(#[from] serde_json::Error),

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using SshcError.
pub type Result<T> = std::result::Result<T, SshcError>;
