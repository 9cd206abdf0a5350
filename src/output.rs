//! Presentation at the terminal boundary.
//!
//! The engine never sees escape codes: search hits take opaque markers, and
//! errors are plain values until [`render_error`] writes them out.

use std::fmt::Display;
use std::io::Write;
use termcolor::{Ansi, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn color_choice(color: bool) -> ColorChoice {
	if color {
		ColorChoice::Always
	} else {
		ColorChoice::Never
	}
}

/// Begin/end markers for a search highlight. Empty when color is off.
pub fn highlight_markers(color: bool) -> (String, String) {
	if !color {
		return (String::new(), String::new());
	}

	let mut begin = Ansi::new(Vec::new());
	let mut end = Ansi::new(Vec::new());
	// Writes into a Vec cannot fail.
	let _ = begin.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)));
	let _ = end.reset();

	(
		String::from_utf8_lossy(&begin.into_inner()).into_owned(),
		String::from_utf8_lossy(&end.into_inner()).into_owned(),
	)
}

/// Write an error message to stderr, red when color is on.
pub fn render_error(error: &dyn Display, color: bool) {
	let mut stderr = StandardStream::stderr(color_choice(color));
	let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
	let _ = write!(stderr, "error: {error}");
	let _ = stderr.reset();
	let _ = writeln!(stderr);
}
