//! External process collaborators for sshc.
//!
//! This module handles:
//! - Describing commands (program, args, optional stdin payload)
//! - Running them with inherited stdio and mapping exit status to errors
//! - Building the editor and remote-append commands

pub mod remote;

pub use remote::{
	RemoteTarget, Transport, TransportPayload, UnsafeShellAcknowledged, build_remote_command,
	prepare, shell_quote,
};

use crate::error::{Result, SshcError};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// A fully formed command for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
	pub program: String,

	pub args: Vec<String>,

	/// Data written to the child's stdin. When `None`, stdin is inherited.
	pub stdin: Option<String>,
}

impl CommandSpec {
	/// Program and arguments joined with spaces, for messages.
	pub fn display(&self) -> String {
		let mut parts = vec![self.program.as_str()];
		parts.extend(self.args.iter().map(String::as_str));
		parts.join(" ")
	}
}

/// Run a command to completion.
///
/// stdout and stderr are passed through to the child. Failure to start and a
/// non-zero exit are both reported as errors.
pub fn execute(spec: &CommandSpec) -> Result<()> {
	debug!(command = %spec.display(), "executing");

	let mut cmd = Command::new(&spec.program);
	cmd.args(&spec.args)
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	let failed = |source: std::io::Error| SshcError::ProcessFailed {
		command: spec.program.clone(),
		source,
	};

	let (status, written) = match &spec.stdin {
		Some(data) => {
			cmd.stdin(Stdio::piped());
			let mut child = cmd.spawn().map_err(failed)?;
			// The child may exit without draining stdin; it is reaped either way.
			let written = match child.stdin.take() {
				Some(mut stdin) => stdin.write_all(data.as_bytes()),
				None => Ok(()),
			};
			(child.wait().map_err(failed)?, written)
		}
		None => {
			cmd.stdin(Stdio::inherit());
			(cmd.status().map_err(failed)?, Ok(()))
		}
	};

	if !status.success() {
		return Err(SshcError::ProcessNonZeroExit {
			command: spec.program.clone(),
			exit_code: status.code().unwrap_or(-1),
		});
	}

	match written {
		Err(source) if source.kind() != std::io::ErrorKind::BrokenPipe => Err(failed(source)),
		_ => Ok(()),
	}
}

/// Build the command that opens `path` in `editor`.
///
/// The editor value may carry its own arguments (`"code --wait"`).
pub fn editor_command(editor: &str, path: &Path) -> CommandSpec {
	let mut words = editor.split_whitespace().map(str::to_string);
	let program = words.next().unwrap_or_else(|| "vim".to_string());
	let mut args: Vec<String> = words.collect();
	args.push(path.to_string_lossy().to_string());

	CommandSpec {
		program,
		args,
		stdin: None,
	}
}
