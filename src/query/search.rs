use crate::error::{Result, SshcError};
use crate::ssh_config::{ConfigDocument, HostBlock};
use regex::Regex;
use tracing::debug;

/// Half-open byte range `[start, end)` into a block's rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
	pub start: usize,
	pub end: usize,
}

/// The first match of a search pattern inside one host block.
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
	/// Position of the block in the document.
	pub index: usize,

	pub block: &'a HostBlock,

	/// The block's rendered text that `span` points into.
	pub rendered: String,

	pub span: MatchSpan,
}

impl SearchHit<'_> {
	/// The matched substring.
	pub fn matched(&self) -> &str {
		&self.rendered[self.span.start..self.span.end]
	}

	/// Rebuild the rendered block with `begin`/`end` wrapped around the match.
	///
	/// Markers are opaque to the engine; pass empty strings to get the plain
	/// block back.
	pub fn highlight(&self, begin: &str, end: &str) -> String {
		let MatchSpan { start, end: stop } = self.span;
		let mut out = String::with_capacity(self.rendered.len() + begin.len() + end.len());
		out.push_str(&self.rendered[..start]);
		out.push_str(begin);
		out.push_str(&self.rendered[start..stop]);
		out.push_str(end);
		out.push_str(&self.rendered[stop..]);
		out
	}
}

/// Compile a user search pattern, optionally case-insensitive.
pub fn compile_search_pattern(pattern: &str, case_insensitive: bool) -> Result<Regex> {
	let source = if case_insensitive {
		format!("(?i){pattern}")
	} else {
		pattern.to_string()
	};

	Regex::new(&source).map_err(|source| SshcError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// Find the first match of `regex` in every block, in document order.
///
/// Blocks without a match are left out. Hits are keyed by block index, so
/// two blocks with identical text each produce their own hit.
pub fn search<'a>(document: &'a ConfigDocument, regex: &Regex) -> Vec<SearchHit<'a>> {
	document
		.blocks()
		.iter()
		.enumerate()
		.filter_map(|(index, block)| {
			let rendered = block.render();
			let found = regex.find(&rendered)?;
			let span = MatchSpan {
				start: found.start(),
				end: found.end(),
			};
			Some(SearchHit {
				index,
				block,
				rendered,
				span,
			})
		})
		.collect()
}

/// Compile `pattern` and search the document with it.
pub fn find<'a>(
	document: &'a ConfigDocument,
	pattern: &str,
	case_insensitive: bool,
) -> Result<Vec<SearchHit<'a>>> {
	let regex = compile_search_pattern(pattern, case_insensitive)?;
	let hits = search(document, &regex);
	debug!(pattern, hits = hits.len(), "searched ssh config");
	Ok(hits)
}
