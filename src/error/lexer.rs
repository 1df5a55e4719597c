use crate::position::SourcePos;

/// Lexer related errors
#[derive(thiserror::Error, Debug)]
pub enum LexerError {
	/// Internal lexer error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered while classifying characters
	#[error(transparent)]
	LexError(#[from] LexError),
}

impl LexerError {
	/// The position of the offending character, when one is known.
	pub fn position(&self) -> SourcePos {
		match self {
			LexerError::LexError(error) => error.position(),
			LexerError::InternalError(_) => SourcePos::invalid(),
		}
	}
}

/// A specific lexical error with the position of the offending character.
#[derive(thiserror::Error, Debug)]
#[error("{position}: {type}")]
pub struct LexError {
	/// Where the offending character was fed.
	position: SourcePos,
	/// The type of lexical error.
	r#type:   LexErrorType,
}

impl LexError {
	pub fn new(position: SourcePos, r#type: LexErrorType) -> Self { Self { position, r#type } }

	pub fn position(&self) -> SourcePos { self.position }
}

/// Types of lexical errors. Every variant carries the offending character.
#[derive(Debug)]
pub enum LexErrorType {
	/// A character that starts no token.
	UnknownCharacter(char),
	/// A number literal began but the character extends nothing, where a
	/// digit or a dot would.
	ExpectedDigitOrDot(char),
	/// A dot or exponent sign with no digit after it.
	ExpectedDigit(char),
	/// An exponent marker with neither sign nor digit after it.
	ExpectedDigitOrSign(char),
}

impl std::fmt::Display for LexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexErrorType::*;
		match self {
			UnknownCharacter(ch) => {
				write!(f, "Unknown char {}", display_char(*ch))
			}
			ExpectedDigitOrDot(ch) => {
				write!(f, "Unknown char {}, expect dot or digit", display_char(*ch))
			}
			ExpectedDigit(ch) => {
				write!(f, "Unknown char {}, expect digit", display_char(*ch))
			}
			ExpectedDigitOrSign(ch) => {
				write!(f, "Unknown char {}, expect digit or sign", display_char(*ch))
			}
		}
	}
}

/// The NUL end marker has no visible glyph; spell it out.
fn display_char(ch: char) -> String {
	if ch == '\0' { "end of input".to_string() } else { format!("'{ch}'") }
}
