use crate::error::{Result, SshcError};
use crate::ssh_config::types::{ConfigDocument, ConfigNode, HostBlock, LineEnding, Pattern};
use std::path::Path;
use tracing::debug;

/// Parse an SSH config file from the given path.
///
/// The file is read in one go and closed before parsing starts.
pub fn parse_config_file(path: &Path) -> Result<ConfigDocument> {
	let content = std::fs::read_to_string(path).map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			SshcError::ConfigNotFound {
				path: path.to_path_buf(),
			}
		} else {
			SshcError::ConfigReadError {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;

	let document = parse_config_str(&content)?;
	debug!(
		path = %path.display(),
		blocks = document.len(),
		"parsed ssh config"
	);
	Ok(document)
}

/// Parse SSH config text into a [`ConfigDocument`].
///
/// A single linear scan: every `Host` line opens a new block and every
/// following line up to the next `Host` line belongs to it. Comments and
/// blank lines before the first `Host` line become the preamble; any other
/// directive there is an error.
pub fn parse_config_str(content: &str) -> Result<ConfigDocument> {
	let mut preamble = Vec::new();
	let mut blocks = Vec::new();
	let mut current: Option<(ConfigNode, Vec<Pattern>, Vec<ConfigNode>)> = None;

	for (index, raw) in content.split_inclusive('\n').enumerate() {
		let line_number = index + 1;
		let node = split_line(raw);

		match classify(node.text(), line_number)? {
			Line::Host(patterns) => {
				if let Some((header, patterns, nodes)) = current.take() {
					blocks.push(HostBlock::new(header, patterns, nodes));
				}
				current = Some((node, patterns, Vec::new()));
			}
			Line::Trivia | Line::Directive => match current.as_mut() {
				Some((_, _, nodes)) => nodes.push(node),
				None if node.is_trivia() => preamble.push(node),
				None => {
					let key = node.key_value().map(|(key, _)| key).unwrap_or_default();
					return Err(SshcError::Parse {
						line: line_number,
						message: format!("directive '{key}' appears before any Host line"),
					});
				}
			},
		}
	}

	if let Some((header, patterns, nodes)) = current {
		blocks.push(HostBlock::new(header, patterns, nodes));
	}

	Ok(ConfigDocument::new(preamble, blocks))
}

enum Line {
	Host(Vec<Pattern>),
	Directive,
	Trivia,
}

fn split_line(raw: &str) -> ConfigNode {
	if let Some(text) = raw.strip_suffix("\r\n") {
		ConfigNode::new(text, LineEnding::CrLf)
	} else if let Some(text) = raw.strip_suffix('\n') {
		ConfigNode::new(text, LineEnding::Lf)
	} else {
		ConfigNode::new(raw, LineEnding::None)
	}
}

fn classify(text: &str, line_number: usize) -> Result<Line> {
	let trimmed = text.trim_start();
	if trimmed.is_empty() || trimmed.starts_with('#') {
		return Ok(Line::Trivia);
	}

	// Keywords end at whitespace or '=' (`Host=web1` is valid).
	let keyword_end = trimmed
		.find(|c: char| c.is_whitespace() || c == '=')
		.unwrap_or(trimmed.len());
	let keyword = &trimmed[..keyword_end];

	if keyword.eq_ignore_ascii_case("match") {
		return Err(SshcError::Parse {
			line: line_number,
			message: "Match blocks are not supported".to_string(),
		});
	}

	if !keyword.eq_ignore_ascii_case("host") {
		return Ok(Line::Directive);
	}

	let rest = trimmed[keyword_end..].trim_start();
	let rest = rest.strip_prefix('=').unwrap_or(rest);
	let rest = match rest.find('#') {
		Some(comment) => &rest[..comment],
		None => rest,
	};

	let patterns: Vec<Pattern> = rest.split_whitespace().map(Pattern::new).collect();
	if patterns.is_empty() {
		return Err(SshcError::Parse {
			line: line_number,
			message: "Host line has no patterns".to_string(),
		});
	}

	Ok(Line::Host(patterns))
}
