//! sshc - a swiss-army knife for your `~/.ssh/config`.
//!
//! This library provides the core functionality for sshc, including:
//! - Lossless parsing of SSH client config files into host blocks
//! - Resolving an alias to a concrete (non-template) host block
//! - Regex search across host blocks with match spans
//! - Flattening a host block into a key/value mapping
//! - Building the command that appends a block to a remote config
//!
//! # Example
//!
//! ```no_run
//! use sshc::query::{extract_fields, resolve};
//! use sshc::ssh_config::parse_config_file;
//! use std::path::Path;
//!
//! let document = parse_config_file(Path::new("/home/me/.ssh/config")).unwrap();
//! let block = resolve(&document, "web1").unwrap();
//!
//! for (key, value) in extract_fields(block) {
//!     println!("{key} = {value}");
//! }
//! ```

pub mod error;
pub mod exec;
pub mod output;
pub mod query;
pub mod settings;
pub mod ssh_config;

pub use error::{Result, SshcError};
