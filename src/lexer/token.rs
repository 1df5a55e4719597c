use crate::position::SourcePos;

/// A token produced by the lexer, carrying the span it was read from.
///
/// `start` and `end` are inclusive; a single-character token has
/// `start == end`. Tokens synthesized by the evaluators carry the invalid
/// sentinel span.
#[derive(Debug, Clone, Copy)]
pub struct Token {
	pub r#type: TokenType,
	pub start:  SourcePos,
	pub end:    SourcePos,
}

impl Token {
	pub fn new(r#type: TokenType, start: SourcePos, end: SourcePos) -> Self { Self { r#type, start, end } }
}

impl From<TokenType> for Token {
	fn from(r#type: TokenType) -> Self { Self::new(r#type, SourcePos::invalid(), SourcePos::invalid()) }
}

/// Tokens compare structurally: operators by tag, numbers by tag and value.
/// Spans never take part in equality.
impl PartialEq for Token {
	fn eq(&self, other: &Self) -> bool { self.r#type == other.r#type }
}

impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.r#type {
			TokenType::Int(value) => write!(f, "Int: {value}"),
			TokenType::Float(value) => write!(f, "Float: {value}"),
			r#type => write!(f, "Token: {}", r#type.kind()),
		}
	}
}

/// The different types of tokens in an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenType {
	/// Integer literal, e.g. `42`.
	Int(i64),
	/// Float literal, e.g. `.5` or `2.1e-10`.
	Float(f64),
	/// Plus `+`.
	Plus,
	/// Minus `-`.
	Minus,
	/// Asterisk `*`.
	Star,
	/// Slash `/`.
	Slash,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// End of expression, produced by the NUL character.
	End,
}

impl TokenType {
	/// Everything except a numeric literal drives the evaluator stacks as an
	/// operator, parentheses and the end marker included.
	pub fn is_op(&self) -> bool { !matches!(self, TokenType::Int(_) | TokenType::Float(_)) }

	/// The payload-free tag of this token type.
	pub fn kind(&self) -> TokenKind {
		match self {
			TokenType::Int(_) => TokenKind::Int,
			TokenType::Float(_) => TokenKind::Float,
			TokenType::Plus => TokenKind::Plus,
			TokenType::Minus => TokenKind::Minus,
			TokenType::Star => TokenKind::Star,
			TokenType::Slash => TokenKind::Slash,
			TokenType::LeftParen => TokenKind::LeftParen,
			TokenType::RightParen => TokenKind::RightParen,
			TokenType::End => TokenKind::End,
		}
	}
}

/// Value-only rendering: the number for literals, the single character for
/// everything else. This is what the REPL echoes as a result.
impl std::fmt::Display for TokenType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			TokenType::Int(value) => write!(f, "{value}"),
			TokenType::Float(value) => write!(f, "{value}"),
			r#type => write!(f, "{}", r#type.kind()),
		}
	}
}

/// Payload-free token tag.
///
/// Used wherever a token's identity matters but its value does not: expected
/// sets in syntax errors, the operator dispatch table, and the precedence
/// table of the direct evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	Int,
	Float,
	Plus,
	Minus,
	Star,
	Slash,
	LeftParen,
	RightParen,
	End,
}

impl TokenKind {
	/// Stack-resolution precedence for the direct evaluator. Parentheses and
	/// the end marker sit below every real operator so they are never applied;
	/// numeric tokens have no precedence at all.
	pub fn precedence(&self) -> Option<i8> {
		match self {
			TokenKind::LeftParen => Some(-1),
			TokenKind::RightParen => Some(-2),
			TokenKind::End => Some(-3),
			TokenKind::Plus | TokenKind::Minus => Some(1),
			TokenKind::Star | TokenKind::Slash => Some(2),
			TokenKind::Int | TokenKind::Float => None,
		}
	}
}

/// Single-character rendering, matching the source character where one
/// exists. Numeric tags render as `i`/`f` and the end marker as `$`.
impl std::fmt::Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let ch = match self {
			TokenKind::Int => 'i',
			TokenKind::Float => 'f',
			TokenKind::Plus => '+',
			TokenKind::Minus => '-',
			TokenKind::Star => '*',
			TokenKind::Slash => '/',
			TokenKind::LeftParen => '(',
			TokenKind::RightParen => ')',
			TokenKind::End => '$',
		};
		write!(f, "{ch}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn equality_ignores_span() {
		let mut pos = SourcePos::invalid();
		pos.advance('1');
		let with_span = Token::new(TokenType::Int(1), pos, pos);
		assert_eq!(with_span, Token::from(TokenType::Int(1)));
		assert_ne!(with_span, Token::from(TokenType::Int(2)));
		assert_ne!(with_span, Token::from(TokenType::Float(1.0)));
	}

	#[test]
	fn operator_classification() {
		assert!(TokenType::Plus.is_op());
		assert!(TokenType::LeftParen.is_op());
		assert!(TokenType::End.is_op());
		assert!(!TokenType::Int(0).is_op());
		assert!(!TokenType::Float(0.0).is_op());
	}

	#[test]
	fn kind_rendering() {
		let rendered: String = [TokenKind::Plus, TokenKind::Minus, TokenKind::Star, TokenKind::Slash]
			.iter()
			.map(TokenKind::to_string)
			.collect();
		assert_eq!(rendered, "+-*/");
		assert_eq!(TokenKind::End.to_string(), "$");
	}
}
