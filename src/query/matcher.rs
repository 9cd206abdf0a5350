use crate::error::{Result, SshcError};
use crate::ssh_config::{ConfigDocument, HostBlock};
use tracing::debug;

/// Match `text` against an ssh-style glob.
///
/// `*` matches any sequence (including none) and `?` matches exactly one
/// character. Everything else is literal and case-sensitive.
pub fn glob_match(pattern: &str, text: &str) -> bool {
	let pattern: Vec<char> = pattern.chars().collect();
	let text: Vec<char> = text.chars().collect();

	let (mut p, mut t) = (0, 0);
	// Position of the last '*' seen and the text index it is currently absorbing up to.
	let mut backtrack: Option<(usize, usize)> = None;

	while t < text.len() {
		if p < pattern.len() && pattern[p] == '*' {
			backtrack = Some((p, t));
			p += 1;
		} else if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
			p += 1;
			t += 1;
		} else if let Some((star, absorbed)) = backtrack {
			p = star + 1;
			t = absorbed + 1;
			backtrack = Some((star, absorbed + 1));
		} else {
			return false;
		}
	}

	pattern[p..].iter().all(|&c| c == '*')
}

/// Check whether `alias` selects `block`.
///
/// The alias is always the literal target, never a pattern. A matching
/// negated pattern (`!glob`) rejects the block outright.
pub fn block_matches(block: &HostBlock, alias: &str) -> bool {
	let mut matched = false;
	for pattern in block.patterns() {
		if glob_match(pattern.glob(), alias) {
			if pattern.is_negated() {
				return false;
			}
			matched = true;
		}
	}
	matched
}

/// Blocks whose first pattern is not a wildcard, with their document index.
pub fn concrete_blocks(document: &ConfigDocument) -> impl Iterator<Item = (usize, &HostBlock)> {
	document
		.blocks()
		.iter()
		.enumerate()
		.filter(|(_, block)| !block.is_template())
}

/// Resolve an alias to the first concrete block that matches it.
///
/// Template blocks (first pattern contains `*`) are never returned, even if
/// they would glob-match the alias.
pub fn resolve<'a>(document: &'a ConfigDocument, alias: &str) -> Result<&'a HostBlock> {
	let found = concrete_blocks(document).find(|(_, block)| block_matches(block, alias));

	match found {
		Some((index, block)) => {
			debug!(alias, index, "resolved host block");
			Ok(block)
		}
		None => Err(SshcError::NoMatch {
			alias: alias.to_string(),
		}),
	}
}
