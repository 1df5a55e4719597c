//! Streaming lexer for arithmetic expressions.
//!
//! The lexer takes one character per [`Lexer::feed`] call and queues completed
//! tokens for [`Lexer::pop`], so a caller can drive it from any character
//! source without handing over a whole buffer. Internally a character runs
//! through the current sub-state; a sub-state that cannot use the character
//! hands it back, and the same `feed` call re-offers it to the next sub-state
//! until someone consumes it. No character is lost and none is seen twice.
//!
//! Number literals are the only multi-character tokens, so the sub-state
//! machine has exactly two layers: the initial state (whitespace, operators,
//! parens, the NUL end marker) and a number state with its own sub-states for
//! digits, the decimal dot and the exponent. The character that terminates a
//! literal is returned to the initial state, which is why a token's span can
//! end at the previous position.

mod token;

use std::collections::VecDeque;

use crate::{error::lexer::{LexError, LexErrorType, LexerError}, position::SourcePos};
pub use token::{Token, TokenKind, TokenType};

/// The outcome of offering one character to one sub-state.
struct Step {
	/// A token completed by this character, if any.
	token:    Option<TokenType>,
	/// Whether the character was used up. An unconsumed character is
	/// re-offered to `next` within the same `feed` call.
	consumed: bool,
	/// The sub-state to continue in.
	next:     State,
}

/// The lexer's current sub-state. Transitions replace the whole value; a
/// fresh `Number` state starts with empty digit buffers.
enum State {
	Initial,
	Number(NumberState),
}

impl State {
	fn step(self, ch: char) -> Result<Step, LexErrorType> {
		match self {
			State::Initial => Self::initial(ch),
			State::Number(number) => number.step(ch),
		}
	}

	fn initial(ch: char) -> Result<Step, LexErrorType> {
		let r#type = match ch {
			'\0' => TokenType::End,
			'+' => TokenType::Plus,
			'-' => TokenType::Minus,
			'*' => TokenType::Star,
			'/' => TokenType::Slash,
			'(' => TokenType::LeftParen,
			')' => TokenType::RightParen,
			ch if ch.is_whitespace() => {
				return Ok(Step { token: None, consumed: true, next: State::Initial });
			}
			// The number state sees its first character itself.
			ch if ch.is_ascii_digit() || ch == '.' => {
				return Ok(Step { token: None, consumed: false, next: State::Number(NumberState::default()) });
			}
			ch => return Err(LexErrorType::UnknownCharacter(ch)),
		};
		Ok(Step { token: Some(r#type), consumed: true, next: State::Initial })
	}
}

#[derive(Default)]
enum NumberSubState {
	#[default]
	Init,
	IntDigit,
	LeadingDot,
	Dotted,
	Exp,
	ExpSigned,
	ExpDigit,
}

/// An in-progress number literal: raw digit buffers plus the flags that
/// decide Int-vs-Float classification on finalization.
#[derive(Default)]
struct NumberState {
	sub:          NumberSubState,
	int_digits:   String,
	dot_digits:   String,
	exp_digits:   String,
	exp_negative: bool,
	has_dot:      bool,
}

impl NumberState {
	fn step(mut self, ch: char) -> Result<Step, LexErrorType> {
		use NumberSubState::*;
		match self.sub {
			Init => {
				if ch.is_ascii_digit() {
					self.int_digits.push(ch);
					self.sub = IntDigit;
				} else if ch == '.' {
					self.has_dot = true;
					self.sub = LeadingDot;
				} else {
					return Err(LexErrorType::ExpectedDigitOrDot(ch));
				}
				Ok(self.keep())
			}
			IntDigit => {
				if ch.is_ascii_digit() {
					self.int_digits.push(ch);
				} else if ch == '.' {
					self.has_dot = true;
					self.sub = Dotted;
				} else if ch == 'e' || ch == 'E' {
					self.sub = Exp;
				} else {
					return Ok(self.finish());
				}
				Ok(self.keep())
			}
			LeadingDot => {
				if ch.is_ascii_digit() {
					self.dot_digits.push(ch);
					self.sub = Dotted;
					Ok(self.keep())
				} else {
					Err(LexErrorType::ExpectedDigit(ch))
				}
			}
			Dotted => {
				if ch.is_ascii_digit() {
					self.dot_digits.push(ch);
				} else if ch == 'e' || ch == 'E' {
					self.sub = Exp;
				} else {
					return Ok(self.finish());
				}
				Ok(self.keep())
			}
			Exp => {
				if ch == '+' || ch == '-' {
					self.exp_negative = ch == '-';
					self.sub = ExpSigned;
				} else if ch.is_ascii_digit() {
					self.exp_digits.push(ch);
					self.sub = ExpDigit;
				} else {
					return Err(LexErrorType::ExpectedDigitOrSign(ch));
				}
				Ok(self.keep())
			}
			ExpSigned => {
				if ch.is_ascii_digit() {
					self.exp_digits.push(ch);
					self.sub = ExpDigit;
					Ok(self.keep())
				} else {
					Err(LexErrorType::ExpectedDigit(ch))
				}
			}
			ExpDigit => {
				if ch.is_ascii_digit() {
					self.exp_digits.push(ch);
					Ok(self.keep())
				} else {
					Ok(self.finish())
				}
			}
		}
	}

	/// The character extended the literal; stay in the number state.
	fn keep(self) -> Step { Step { token: None, consumed: true, next: State::Number(self) } }

	/// The character cannot extend the literal: classify and emit it, hand
	/// the character back to the initial state.
	fn finish(self) -> Step {
		// Parse the integer digits as i64 directly so values above 2^53 stay
		// exact; overflow (or a missing integer part) falls to the float path.
		let int_value = self.int_digits.parse::<i64>().ok();

		let mut literal = self.int_digits;
		if self.has_dot {
			literal.push('.');
			literal.push_str(&self.dot_digits);
		}
		if !self.exp_digits.is_empty() {
			literal.push('e');
			if self.exp_negative {
				literal.push('-');
			}
			literal.push_str(&self.exp_digits);
		}
		// The buffers only ever hold ASCII digits, so the reassembled literal
		// always parses; an oversized exponent overflows to infinity.
		let value = literal.parse::<f64>().unwrap_or(f64::NAN);

		let int_value = if self.exp_digits.is_empty() {
			int_value
		} else {
			let magnitude = self.exp_digits.parse::<i32>().unwrap_or(i32::MAX);
			let exp = if self.exp_negative { -magnitude } else { magnitude };
			int_value.map(|int_value| (int_value as f64 * 10f64.powi(exp)) as i64)
		};

		// A dot, a negative exponent sign, or a magnitude at or beyond
		// i64::MAX forces a Float, even when the value itself is integral.
		let r#type = match int_value {
			Some(int_value) if !self.has_dot && !self.exp_negative && value < i64::MAX as f64 => {
				TokenType::Int(int_value)
			}
			_ => TokenType::Float(value),
		};
		Step { token: Some(r#type), consumed: false, next: State::Initial }
	}
}

/// A streaming lexer for arithmetic expressions.
///
/// Feed characters with [`feed`](Self::feed), pull completed tokens with
/// [`pop`](Self::pop). Feeding `'\0'` emits the [`TokenType::End`] marker.
/// After a [`LexerError`] the lexer must be [`reset`](Self::reset) before it
/// is fed again.
pub struct Lexer {
	state:     State,
	tokens:    VecDeque<Token>,
	/// Start of the token in progress; invalid while no token has begun.
	start_pos: SourcePos,
	prev_pos:  SourcePos,
	cur_pos:   SourcePos,
}

impl Lexer {
	pub fn new() -> Self {
		Self {
			state:     State::Initial,
			tokens:    VecDeque::new(),
			start_pos: SourcePos::invalid(),
			prev_pos:  SourcePos::invalid(),
			cur_pos:   SourcePos::invalid(),
		}
	}

	/// Feed one character, advancing the source position exactly once no
	/// matter how many sub-states the character passes through.
	pub fn feed(&mut self, ch: char) -> Result<(), LexerError> {
		self.prev_pos = self.cur_pos;
		self.cur_pos.advance(ch);

		loop {
			let state = std::mem::replace(&mut self.state, State::Initial);
			let in_initial = matches!(state, State::Initial);
			let step = state.step(ch).map_err(|r#type| LexError::new(self.cur_pos, r#type))?;

			// Arm the start marker the first time a character is taken by a
			// literal in progress, or immediately for single-character tokens.
			if !self.start_pos.is_valid() && ((step.consumed && !in_initial) || step.token.is_some()) {
				self.start_pos = self.cur_pos;
			}

			if let Some(r#type) = step.token {
				// A finalizing character that was handed back belongs to the
				// next token, so the span closes at the previous position.
				let end = if step.consumed { self.cur_pos } else { self.prev_pos };
				self.tokens.push_back(Token::new(r#type, self.start_pos, end));
				self.start_pos = SourcePos::invalid();
			}

			self.state = step.next;
			if step.consumed {
				return Ok(());
			}
		}
	}

	/// Pull one ready token, in the order they were completed.
	pub fn pop(&mut self) -> Option<Token> { self.tokens.pop_front() }

	/// Drop queued tokens, position tracking and any literal in progress.
	pub fn reset(&mut self) { *self = Self::new(); }
}

impl Default for Lexer {
	fn default() -> Self { Self::new() }
}
