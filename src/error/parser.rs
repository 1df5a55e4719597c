use crate::lexer::{Token, TokenKind};

/// Parser related errors
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	/// Internal parser error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// A token the grammar cannot accept in the current state
	#[error(transparent)]
	SyntaxError(#[from] SyntaxError),
}

/// A grammar mismatch: the offending token plus the set of token types the
/// automaton would have accepted instead.
#[derive(thiserror::Error, Debug)]
#[error("expected token types '{}', got {got}", expected_types(.expected))]
pub struct SyntaxError {
	expected: Vec<TokenKind>,
	got:      Token,
}

impl SyntaxError {
	pub fn new(expected: Vec<TokenKind>, got: Token) -> Self { Self { expected, got } }

	/// The token the automaton choked on, for caret rendering.
	pub fn token(&self) -> Token { self.got }

	pub fn expected(&self) -> &[TokenKind] { &self.expected }
}

fn expected_types(expected: &[TokenKind]) -> String { expected.iter().map(TokenKind::to_string).collect() }
