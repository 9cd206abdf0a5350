use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{Level, info};

use sshc::exec::{
	RemoteTarget, Transport, UnsafeShellAcknowledged, build_remote_command, editor_command,
	execute,
};
use sshc::output::{highlight_markers, render_error};
use sshc::query::{extract_fields, fields_to_json, find, resolve};
use sshc::settings::{Overrides, Settings, load_settings};
use sshc::ssh_config::{ConfigDocument, locate_ssh_config, parse_config_file};

#[derive(Parser)]
#[command(name = "sshc")]
#[command(
	author,
	version,
	about = "Your ~/.ssh/config swiss-army knife",
	long_about = "This tool understands the format of your SSH configuration and lets you pull \
	              out information from it and copy definitions to remote hosts"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Path to ssh config file [default: ~/.ssh/config]
	#[arg(short = 'c', long, global = true, value_name = "PATH")]
	config: Option<String>,

	/// Use ANSI terminal colors
	#[arg(long, global = true)]
	color: bool,

	/// Increase log verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Return a single host definition from your ssh config
	Get {
		/// Host to return from your SSH config file
		alias: String,

		/// Output this host in JSON format
		#[arg(short = 'j', long = "json", visible_alias = "json-output")]
		json: bool,
	},

	/// Show all hosts defined in your configuration
	#[command(visible_alias = "remotes")]
	Hosts,

	/// Open your config file in $EDITOR
	#[command(visible_alias = "e")]
	Edit,

	/// Copy a definition from your local ssh config to the ssh config on a remote host
	///
	/// The definition is appended to the remote file, which is never truncated.
	#[command(visible_alias = "copy-def")]
	Copy {
		/// Host to copy from your SSH config file
		alias: String,

		/// SSH destination for the remote host (user@host or ssh://user@host:port)
		endpoint: String,

		/// Path of file to which the host definition should be appended [default: $HOME/.ssh/config]
		#[arg(short = 'p', long, value_name = "PATH")]
		remote_path: Option<String>,

		/// Use the legacy `bash -c 'echo -e ...'` transport. The remote path is
		/// pasted into the remote shell unescaped: shell metacharacters in it
		/// WILL execute on the remote host.
		#[arg(long)]
		unsafe_shell: bool,
	},

	/// Search through your configuration for a regex, return the whole Host block which matches it
	#[command(visible_aliases = ["grep", "search"])]
	Find {
		/// Regex to search for in your ssh config
		pattern: String,

		/// Make the regex case-insensitive
		#[arg(short = 'i', long)]
		ignore_case: bool,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err((e, color)) => {
			render_error(&format!("{e:#}"), color);
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => Level::WARN,
		1 => Level::INFO,
		_ => Level::DEBUG,
	};
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_ansi(std::io::stderr().is_terminal())
		.init();
}

/// Returns the error together with whether it should be shown in color.
fn run(cli: Cli) -> std::result::Result<(), (anyhow::Error, bool)> {
	let remote_path = match &cli.command {
		Commands::Copy { remote_path, .. } => remote_path.clone(),
		_ => None,
	};
	let overrides = Overrides {
		config_path: cli.config,
		color: cli.color,
		remote_path,
	};

	let settings = load_settings(&overrides)
		.context("Failed to load settings")
		.map_err(|e| (e, cli.color))?;
	let color = settings.color;

	dispatch(cli.command, &settings).map_err(|e| (e, color))
}

fn dispatch(command: Commands, settings: &Settings) -> Result<()> {
	match command {
		Commands::Get { alias, json } => handle_get(settings, &alias, json),
		Commands::Hosts => handle_hosts(settings),
		Commands::Edit => handle_edit(settings),
		Commands::Copy {
			alias,
			endpoint,
			unsafe_shell,
			..
		} => handle_copy(settings, &alias, endpoint, unsafe_shell),
		Commands::Find {
			pattern,
			ignore_case,
		} => handle_find(settings, &pattern, ignore_case),
	}
}

fn load_document(settings: &Settings) -> Result<ConfigDocument> {
	Ok(parse_config_file(&settings.config_path)?)
}

fn handle_get(settings: &Settings, alias: &str, json: bool) -> Result<()> {
	let document = load_document(settings)?;
	let block = resolve(&document, alias)?;

	if json {
		let fields = extract_fields(block);
		println!("{}", fields_to_json(&fields)?);
	} else {
		print!("{block}");
	}

	Ok(())
}

fn handle_hosts(settings: &Settings) -> Result<()> {
	let document = load_document(settings)?;

	for pattern in document.patterns() {
		println!("{pattern}");
	}

	Ok(())
}

fn handle_edit(settings: &Settings) -> Result<()> {
	let path = locate_ssh_config(&settings.config_path)?;
	let spec = editor_command(&settings.editor, path);

	execute(&spec).with_context(|| format!("Editor failed: {}", settings.editor))?;
	Ok(())
}

fn handle_copy(
	settings: &Settings,
	alias: &str,
	endpoint: String,
	unsafe_shell: bool,
) -> Result<()> {
	let document = load_document(settings)?;
	let block = resolve(&document, alias)?;

	let transport = if unsafe_shell {
		Transport::ShellEcho(UnsafeShellAcknowledged::acknowledge_shell_injection_risk())
	} else {
		Transport::StdinAppend
	};
	let target = RemoteTarget {
		endpoint,
		path: settings.remote_path.clone(),
		ssh_program: settings.ssh_program.clone(),
	};

	let spec = build_remote_command(block, &target, transport);
	execute(&spec).with_context(|| format!("Failed to copy '{alias}' to {}", target.endpoint))?;

	info!(alias, endpoint = %target.endpoint, path = %target.path, "copied host definition");
	Ok(())
}

fn handle_find(settings: &Settings, pattern: &str, ignore_case: bool) -> Result<()> {
	let document = load_document(settings)?;
	let hits = find(&document, pattern, ignore_case)?;
	let (begin, end) = highlight_markers(settings.color);

	for hit in &hits {
		print!("{}", hit.highlight(&begin, &end));
	}

	Ok(())
}
