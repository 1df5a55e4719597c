//! Line/column bookkeeping for the character stream.
//!
//! Positions advance one character at a time while the lexer consumes input,
//! so every token can carry the exact span it was read from. Columns restart
//! after a line break; the break itself is the last column of its line.

/// A location in the fed character stream.
///
/// The sentinel returned by [`SourcePos::invalid`] stands for "not observed
/// yet": a fresh tracker holds it until the first character arrives, and the
/// lexer uses it to mark that the next token has not started.
#[derive(Debug, Clone, Copy)]
pub struct SourcePos {
	pub line:   i32,
	pub column: i32,
	/// Whether the previously fed character was a line break. The next
	/// advance then rolls over to a new line instead of bumping the column.
	last_newline: bool,
}

impl SourcePos {
	pub fn new(line: i32, column: i32) -> Self { Self { line, column, last_newline: true } }

	/// The "not observed yet" sentinel.
	pub fn invalid() -> Self { Self::new(-1, -1) }

	pub fn is_valid(&self) -> bool { self.line >= 0 && self.column >= 0 }

	/// Step past one character. The sentinel starts with the line-break flag
	/// set, so the very first character lands on line 0, column 0.
	pub fn advance(&mut self, ch: char) {
		if self.last_newline {
			self.line += 1;
			self.column = 0;
		} else {
			self.column += 1;
		}
		self.last_newline = ch == '\n';
	}
}

impl Default for SourcePos {
	fn default() -> Self { Self::invalid() }
}

/// Spans compare by location only; the line-break flag is advancement state.
impl PartialEq for SourcePos {
	fn eq(&self, other: &Self) -> bool { self.line == other.line && self.column == other.column }
}

impl std::fmt::Display for SourcePos {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advance_through_lines() {
		let mut pos = SourcePos::invalid();
		assert!(!pos.is_valid());

		for (ch, line, column) in [('a', 0, 0), ('\n', 0, 1), ('b', 1, 0), ('c', 1, 1)] {
			pos.advance(ch);
			assert_eq!(pos, SourcePos::new(line, column));
		}
	}

	#[test]
	fn equality_ignores_newline_flag() {
		let mut a = SourcePos::invalid();
		a.advance('\n');
		let mut b = SourcePos::invalid();
		b.advance('x');
		// Same location, different pending-line-break state.
		assert_eq!(a, b);
	}
}
