//! SSH client config model and parsing.
//!
//! This module handles:
//! - Splitting config text into ordered `Host` blocks
//! - Lossless rendering of blocks back to text
//! - Locating the config file on disk

pub mod parser;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use types::{ConfigDocument, ConfigNode, HostBlock, LineEnding, Pattern};

use crate::error::{Result, SshcError};
use std::path::Path;

/// Check that the config file exists before handing its path to a collaborator.
pub fn locate_ssh_config(path: &Path) -> Result<&Path> {
	if path.is_file() {
		Ok(path)
	} else {
		Err(SshcError::ConfigNotFound {
			path: path.to_path_buf(),
		})
	}
}
