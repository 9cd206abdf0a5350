//! Replicating a host block into a remote host's SSH config.
//!
//! Two transports are available:
//!
//! - [`Transport::StdinAppend`] (default) streams the block over stdin to
//!   `cat >> <path>` on the remote side. The path is single-quoted, so shell
//!   metacharacters in it are inert.
//! - [`Transport::ShellEcho`] reproduces the historical one-liner
//!   `bash -c 'echo -e "<payload>" >> <path>'`. **The destination path is
//!   interpolated into the remote shell without escaping**: any shell
//!   metacharacter in it runs on the remote host. The payload is only
//!   newline-escaped, so quotes or `$` inside the block are interpreted too.
//!   Building this transport requires an [`UnsafeShellAcknowledged`] token
//!   and logs a warning every time.
//!
//! Both transports only ever append; the remote file is never truncated.

use crate::exec::CommandSpec;
use crate::ssh_config::HostBlock;
use tracing::{debug, warn};

/// A block rendered and escaped onto a single line.
///
/// Every newline is replaced by the two characters `\` `n`, which a shell
/// `echo -e` turns back into line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportPayload {
	raw: String,
	escaped: String,
}

impl TransportPayload {
	/// The block text exactly as rendered.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// The single-line, backslash-n escaped form.
	pub fn escaped(&self) -> &str {
		&self.escaped
	}
}

/// Render and escape a block for transport.
pub fn prepare(block: &HostBlock) -> TransportPayload {
	let raw = block.render();
	let escaped = raw.replace('\n', "\\n");
	TransportPayload { raw, escaped }
}

/// Proof that the caller opted into the shell-interpolating transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsafeShellAcknowledged(());

impl UnsafeShellAcknowledged {
	/// Accept that the remote path is pasted into a shell command unescaped.
	pub fn acknowledge_shell_injection_risk() -> Self {
		Self(())
	}
}

/// How the payload reaches the remote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
	#[default]
	StdinAppend,
	ShellEcho(UnsafeShellAcknowledged),
}

/// Where a block should be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
	/// ssh destination, e.g. `user@host` or `ssh://user@host:2222`.
	pub endpoint: String,

	/// Remote file to append to.
	pub path: String,

	/// Local ssh client binary.
	pub ssh_program: String,
}

/// Quote a string for a POSIX shell using single quotes.
pub fn shell_quote(value: &str) -> String {
	format!("'{}'", value.replace('\'', r"'\''"))
}

/// Quote a remote path, keeping a leading `~/` or `$HOME/` relative to the
/// remote user's home directory.
fn quote_remote_path(path: &str) -> String {
	let home_relative = path
		.strip_prefix("~/")
		.or_else(|| path.strip_prefix("$HOME/"));

	match home_relative {
		Some(rest) => format!("\"$HOME\"/{}", shell_quote(rest)),
		None => shell_quote(path),
	}
}

/// Build the command that appends `block` to the target's remote file.
pub fn build_remote_command(
	block: &HostBlock,
	target: &RemoteTarget,
	transport: Transport,
) -> CommandSpec {
	let payload = prepare(block);

	match transport {
		Transport::StdinAppend => {
			let mut data = payload.raw;
			if !data.ends_with('\n') {
				data.push('\n');
			}
			let instruction = format!("cat >> {}", quote_remote_path(&target.path));
			debug!(endpoint = %target.endpoint, %instruction, "appending over stdin");

			CommandSpec {
				program: target.ssh_program.clone(),
				args: vec!["--".to_string(), target.endpoint.clone(), instruction],
				stdin: Some(data),
			}
		}
		Transport::ShellEcho(_) => {
			warn!(
				path = %target.path,
				"remote path is interpolated into a shell command without escaping; \
				 shell metacharacters in it will execute on {}",
				target.endpoint
			);
			let instruction = format!(
				"bash -c 'echo -e \"{}\" >> {}'",
				payload.escaped, target.path
			);

			CommandSpec {
				program: target.ssh_program.clone(),
				args: vec!["--".to_string(), target.endpoint.clone(), instruction],
				stdin: None,
			}
		}
	}
}
