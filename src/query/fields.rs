use crate::error::Result;
use crate::ssh_config::HostBlock;
use std::collections::BTreeMap;

/// Flat directive mapping of a host block. Keys serialize alphabetically.
pub type HostFields = BTreeMap<String, String>;

/// Decompose a block's directives into a key/value mapping.
///
/// Blank lines and comments are skipped. When a key repeats, the later
/// line wins.
pub fn extract_fields(block: &HostBlock) -> HostFields {
	block
		.nodes()
		.iter()
		.filter_map(|node| node.key_value())
		.map(|(key, value)| (key.to_string(), value.to_string()))
		.collect()
}

/// Serialize fields as a pretty JSON object (two-space indent).
pub fn fields_to_json(fields: &HostFields) -> Result<String> {
	Ok(serde_json::to_string_pretty(fields)?)
}
