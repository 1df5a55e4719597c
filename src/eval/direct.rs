//! Direct token-level evaluation.
//!
//! An operator-precedence shift/reduce machine: operands go on a value
//! stack, operators wait on an operator stack until a token of lower or
//! equal precedence forces them to apply. Parentheses and the end marker
//! carry sentinel precedences below every real operator, so they are never
//! applied themselves — a `(` just sits as a boundary until its `)` arrives.
//! The result is the same precedence and associativity resolution as the
//! grammar automaton, without ever materializing a tree.

use crate::{error::eval::EvalError, eval::ops::{self, NUMERIC}, lexer::{Token, TokenKind, TokenType}};

/// Evaluates the token stream against a value stack and an operator stack.
///
/// Feed tokens in source order, the [`End`](TokenType::End) marker last;
/// [`get_result`](Self::get_result) then yields the single remaining value.
#[derive(Default)]
pub struct TokenEvaluator {
	ops:    Vec<Token>,
	values: Vec<Token>,
}

impl TokenEvaluator {
	pub fn new() -> Self { Self::default() }

	pub fn feed(&mut self, token: Token) -> Result<(), EvalError> {
		if token.r#type == TokenType::LeftParen {
			self.ops.push(token);
			return Ok(());
		}
		if !token.r#type.is_op() {
			self.values.push(token);
			return Ok(());
		}

		// Apply every stacked operator the incoming token cannot outrank.
		loop {
			let Some(&top) = self.ops.last() else { break };
			if precedence(top.r#type)? < precedence(token.r#type)? {
				break;
			}
			if top.r#type == TokenType::LeftParen {
				if token.r#type != TokenType::RightParen {
					return Err(EvalError::UnclosedParenthesis);
				}
				// The pair annihilates; neither token survives.
				self.ops.pop();
				return Ok(());
			}
			self.ops.pop();
			self.apply(top)?;
		}

		if token.r#type == TokenType::End {
			self.check_result()
		} else {
			self.ops.push(token);
			Ok(())
		}
	}

	/// Whether the expression has collapsed to exactly one value.
	pub fn is_finished(&self) -> bool { self.ops.is_empty() && self.values.len() == 1 }

	pub fn get_result(&mut self) -> Result<Token, EvalError> {
		if !self.is_finished() {
			return Err(EvalError::NotFinished);
		}
		self.values.pop().ok_or(EvalError::NoResult)
	}

	/// Empty both stacks, whatever state the last expression left them in.
	pub fn reset(&mut self) {
		self.ops.clear();
		self.values.clear();
	}

	fn apply(&mut self, op: Token) -> Result<(), EvalError> {
		let kind = op.r#type.kind();
		let func = ops::builtin(kind).ok_or(EvalError::NotImplemented(kind))?;
		let args = extract_arguments(&mut self.values, &[NUMERIC, NUMERIC])?;
		self.values.push(Token::from(func(&args)?));
		Ok(())
	}

	fn check_result(&self) -> Result<(), EvalError> {
		debug_assert!(self.ops.is_empty());
		if self.values.is_empty() { Err(EvalError::NoResult) } else { Ok(()) }
	}
}

fn precedence(r#type: TokenType) -> Result<i8, EvalError> {
	r#type.kind().precedence().ok_or(EvalError::UnknownPrecedence(r#type.kind()))
}

/// Pop one operand per spec entry off the value stack, checking each popped
/// token against that entry's acceptable kinds, and return them in source
/// order.
pub(crate) fn extract_arguments(values: &mut Vec<Token>, spec: &[&[TokenKind]]) -> Result<Vec<Token>, EvalError> {
	if values.len() < spec.len() {
		return Err(EvalError::MissingArgument { expected: spec.len(), available: values.len() });
	}

	let mut args = Vec::with_capacity(spec.len());
	for acceptable in spec {
		let Some(token) = values.pop() else {
			return Err(EvalError::MissingArgument { expected: spec.len(), available: args.len() });
		};
		let kind = token.r#type.kind();
		if !acceptable.contains(&kind) {
			return Err(EvalError::TypeMismatch { expected: ops::kinds_string(acceptable), got: kind });
		}
		args.push(token);
	}
	args.reverse();
	Ok(args)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lexer::Lexer;

	fn int(value: i64) -> Token { Token::from(TokenType::Int(value)) }

	fn float(value: f64) -> Token { Token::from(TokenType::Float(value)) }

	fn eval(input: &str) -> Result<Token, EvalError> {
		let mut lexer = Lexer::new();
		let mut evaluator = TokenEvaluator::new();
		for ch in input.chars().chain(std::iter::once('\0')) {
			lexer.feed(ch).unwrap();
			while let Some(token) = lexer.pop() {
				evaluator.feed(token)?;
			}
		}
		evaluator.get_result()
	}

	#[test]
	fn extract_checks_availability() {
		let mut values = Vec::new();
		assert_eq!(extract_arguments(&mut values, &[]).unwrap().len(), 0);
		assert!(matches!(
			extract_arguments(&mut values, &[NUMERIC]),
			Err(EvalError::MissingArgument { expected: 1, available: 0 })
		));
	}

	#[test]
	fn extract_returns_source_order() {
		let mut values = vec![int(1), float(2.0)];
		let args = extract_arguments(&mut values, &[NUMERIC, NUMERIC]).unwrap();
		assert!(values.is_empty());
		assert_eq!(args, vec![int(1), float(2.0)]);
	}

	#[test]
	fn extract_checks_kinds() {
		let mut values = vec![int(1), Token::from(TokenType::LeftParen)];
		assert!(matches!(
			extract_arguments(&mut values, &[NUMERIC, NUMERIC]),
			Err(EvalError::TypeMismatch { .. })
		));
	}

	#[test]
	fn arithmetic() {
		assert_eq!(eval("1 + 1").unwrap(), int(2));
		assert_eq!(eval("1 + 1 + 2").unwrap(), int(4));
		assert_eq!(eval("1 + 2*3").unwrap(), int(7));
		assert_eq!(eval("2*2 + 3").unwrap(), int(7));
		assert_eq!(eval("2").unwrap(), int(2));
	}

	#[test]
	fn parentheses() {
		assert_eq!(eval("(2)").unwrap(), int(2));
		assert_eq!(eval("(3 + 4)").unwrap(), int(7));
		assert_eq!(eval("2 * (3 + 4)").unwrap(), int(14));
		assert_eq!(eval("(3 + 4) * 2").unwrap(), int(14));
		assert_eq!(eval("(3 + ((3 + 4 / 2) - 1)) * 2").unwrap(), int(14));
		assert_eq!(eval("((((((2))))))").unwrap(), int(2));
	}

	#[test]
	fn promotion_and_division() {
		assert_eq!(eval("1 + 0.5").unwrap(), float(1.5));
		assert_eq!(eval("3 / 2").unwrap(), float(1.5));
		assert_eq!(eval("4 / 2").unwrap(), int(2));
		assert_eq!(eval("1 / 0").unwrap(), float(f64::INFINITY));
	}

	#[test]
	fn unclosed_parenthesis() {
		assert!(matches!(eval("(3 + 4"), Err(EvalError::UnclosedParenthesis)));
	}

	#[test]
	fn unmatched_close_paren() {
		// A stray `)` is shifted like an operator and fails on application.
		assert!(matches!(eval("3)"), Err(EvalError::NotImplemented(TokenKind::RightParen))));
	}

	#[test]
	fn two_values_never_finish() {
		let mut lexer = Lexer::new();
		let mut evaluator = TokenEvaluator::new();
		for ch in "1 2\0".chars() {
			lexer.feed(ch).unwrap();
			while let Some(token) = lexer.pop() {
				evaluator.feed(token).unwrap();
			}
		}
		assert!(!evaluator.is_finished());
		assert!(matches!(evaluator.get_result(), Err(EvalError::NotFinished)));
	}

	#[test]
	fn reset_clears_both_stacks() {
		let mut evaluator = TokenEvaluator::new();
		evaluator.feed(int(1)).unwrap();
		evaluator.feed(Token::from(TokenType::Plus)).unwrap();
		evaluator.reset();

		evaluator.feed(int(5)).unwrap();
		evaluator.feed(Token::from(TokenType::End)).unwrap();
		assert_eq!(evaluator.get_result().unwrap(), int(5));
	}
}
