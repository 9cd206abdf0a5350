use std::fmt;

/// Terminator that followed a line in the source text.
///
/// Kept per line so rendering reproduces the input byte for byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
	/// Last line of a file with no trailing newline.
	#[default]
	None,
	Lf,
	CrLf,
}

impl LineEnding {
	pub fn as_str(&self) -> &'static str {
		match self {
			LineEnding::None => "",
			LineEnding::Lf => "\n",
			LineEnding::CrLf => "\r\n",
		}
	}
}

/// A single raw line of an SSH config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNode {
	text: String,
	ending: LineEnding,
}

impl ConfigNode {
	pub fn new(text: impl Into<String>, ending: LineEnding) -> Self {
		Self {
			text: text.into(),
			ending,
		}
	}

	/// The line without its terminator.
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn ending(&self) -> LineEnding {
		self.ending
	}

	/// True for blank lines and `#` comments.
	pub fn is_trivia(&self) -> bool {
		let trimmed = self.text.trim_start();
		trimmed.is_empty() || trimmed.starts_with('#')
	}

	/// Split the directive into `(key, value)`.
	///
	/// Leading indentation is dropped, then the line is split at its first
	/// whitespace run. The value is the rest of the line as written. Returns
	/// `None` for blank lines and comments.
	pub fn key_value(&self) -> Option<(&str, &str)> {
		if self.is_trivia() {
			return None;
		}

		let trimmed = self.text.trim_start();
		match trimmed.find(char::is_whitespace) {
			Some(split) => Some((&trimmed[..split], trimmed[split..].trim_start())),
			None => Some((trimmed, "")),
		}
	}

	fn write_to(&self, out: &mut String) {
		out.push_str(&self.text);
		out.push_str(self.ending.as_str());
	}
}

/// One token of a `Host` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(String);

impl Pattern {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// A pattern containing `*` describes a template, not a concrete host.
	pub fn is_wildcard(&self) -> bool {
		self.0.contains('*')
	}

	/// `!pattern` excludes hosts instead of selecting them.
	pub fn is_negated(&self) -> bool {
		self.0.starts_with('!')
	}

	/// The glob with any leading `!` removed.
	pub fn glob(&self) -> &str {
		self.0.strip_prefix('!').unwrap_or(&self.0)
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A `Host` line together with every line up to the next `Host` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBlock {
	header: ConfigNode,
	patterns: Vec<Pattern>,
	nodes: Vec<ConfigNode>,
}

impl HostBlock {
	/// Callers must pass at least one pattern; the parser guarantees this.
	pub fn new(header: ConfigNode, patterns: Vec<Pattern>, nodes: Vec<ConfigNode>) -> Self {
		debug_assert!(!patterns.is_empty());
		Self {
			header,
			patterns,
			nodes,
		}
	}

	/// The raw `Host` line.
	pub fn header(&self) -> &ConfigNode {
		&self.header
	}

	pub fn patterns(&self) -> &[Pattern] {
		&self.patterns
	}

	/// Directive, comment and blank lines in source order.
	pub fn nodes(&self) -> &[ConfigNode] {
		&self.nodes
	}

	/// True when the first pattern is a wildcard, i.e. the block is a template.
	pub fn is_template(&self) -> bool {
		self.patterns.first().is_some_and(Pattern::is_wildcard)
	}

	/// Render the block exactly as it appeared in the source.
	pub fn render(&self) -> String {
		let mut out = String::new();
		self.header.write_to(&mut out);
		for node in &self.nodes {
			node.write_to(&mut out);
		}
		out
	}
}

impl fmt::Display for HostBlock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

/// A parsed SSH client config: comment preamble plus host blocks in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
	preamble: Vec<ConfigNode>,
	blocks: Vec<HostBlock>,
}

impl ConfigDocument {
	pub fn new(preamble: Vec<ConfigNode>, blocks: Vec<HostBlock>) -> Self {
		Self { preamble, blocks }
	}

	/// Comments and blank lines before the first `Host` line.
	pub fn preamble(&self) -> &[ConfigNode] {
		&self.preamble
	}

	pub fn blocks(&self) -> &[HostBlock] {
		&self.blocks
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	/// Every pattern token of every block, in file order.
	pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
		self.blocks.iter().flat_map(|block| block.patterns().iter())
	}

	/// Render the whole document, preamble included.
	pub fn render(&self) -> String {
		let mut out = String::new();
		for node in &self.preamble {
			node.write_to(&mut out);
		}
		for block in &self.blocks {
			out.push_str(&block.render());
		}
		out
	}
}
