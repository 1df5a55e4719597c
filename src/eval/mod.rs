//! Expression evaluation.
//!
//! Two interchangeable pipelines turn the token stream into one numeric
//! token: [`AstEvaluator`] parses into a tree and walks it with
//! [`eval_node`], while [`TokenEvaluator`] resolves precedence directly
//! against a pair of stacks and never builds a tree. Both run the operator
//! implementations in [`ops`], so their numeric results are identical; the
//! tree costs an intermediate structure but can be inspected and printed,
//! the direct machine cannot.

mod direct;
pub(crate) mod ops;

use crate::{error::{CalcError, eval::EvalError}, lexer::Token, parser::{Node, Parser}};
pub use direct::TokenEvaluator;

/// The seam the drivers run against: feed tokens in source order, take the
/// result after the end marker, reset before the next expression.
pub trait Evaluator {
	fn feed(&mut self, token: Token) -> Result<(), CalcError>;
	fn get_result(&mut self) -> Result<Token, CalcError>;
	fn reset(&mut self);
}

/// Evaluate a parsed tree bottom-up.
///
/// Literal nodes yield their own token; operator nodes evaluate every child
/// first, then apply the operator from the builtin table to the results.
pub fn eval_node(node: &Node) -> Result<Token, EvalError> {
	if !node.token.r#type.is_op() {
		return Ok(node.token);
	}

	let kind = node.token.r#type.kind();
	let func = ops::builtin(kind).ok_or(EvalError::NotImplemented(kind))?;
	let args = node.children.iter().map(eval_node).collect::<Result<Vec<_>, _>>()?;
	Ok(Token::from(func(&args)?))
}

/// The tree pipeline behind the [`Evaluator`] seam: parse on feed, walk on
/// result.
#[derive(Default)]
pub struct AstEvaluator {
	parser: Parser,
}

impl AstEvaluator {
	pub fn new() -> Self { Self::default() }
}

impl Evaluator for AstEvaluator {
	fn feed(&mut self, token: Token) -> Result<(), CalcError> { Ok(self.parser.feed(token)?) }

	fn get_result(&mut self) -> Result<Token, CalcError> {
		let root = self.parser.get_result()?;
		Ok(eval_node(&root)?)
	}

	fn reset(&mut self) { self.parser = Parser::new(); }
}

impl Evaluator for TokenEvaluator {
	fn feed(&mut self, token: Token) -> Result<(), CalcError> { Ok(TokenEvaluator::feed(self, token)?) }

	fn get_result(&mut self) -> Result<Token, CalcError> { Ok(TokenEvaluator::get_result(self)?) }

	fn reset(&mut self) { TokenEvaluator::reset(self); }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lexer::{Lexer, TokenType};

	fn eval(input: &str) -> Result<Token, CalcError> {
		let mut lexer = Lexer::new();
		let mut parser = Parser::new();
		for ch in input.chars().chain(std::iter::once('\0')) {
			lexer.feed(ch).unwrap();
			while let Some(token) = lexer.pop() {
				parser.feed(token)?;
			}
		}
		let root = parser.get_result()?;
		Ok(eval_node(&root)?)
	}

	fn int(value: i64) -> Token { Token::from(TokenType::Int(value)) }

	fn float(value: f64) -> Token { Token::from(TokenType::Float(value)) }

	#[test]
	fn tree_evaluation() {
		assert_eq!(eval("1").unwrap(), int(1));
		assert_eq!(eval("1 + 1").unwrap(), int(2));
		assert_eq!(eval("-5 - 1 + 2 * 3").unwrap(), int(0));
	}

	#[test]
	fn unary_sign() {
		assert_eq!(eval("-1 + 2").unwrap(), int(1));
		assert_eq!(eval("-1 * 2").unwrap(), int(-2));
		assert_eq!(eval("-1 * 2 + 3").unwrap(), int(1));
	}

	#[test]
	fn float_contagion() {
		assert_eq!(eval("1 + 2.5").unwrap(), float(3.5));
		// One float operand anywhere floats the whole expression.
		assert_eq!(eval("(1 + 2.0) * 3").unwrap(), float(9.0));
	}

	#[test]
	fn division_semantics() {
		assert_eq!(eval("4 / 2").unwrap(), int(2));
		assert_eq!(eval("3 / 2").unwrap(), float(1.5));
		assert_eq!(eval("1 / 0").unwrap(), float(f64::INFINITY));
		assert_eq!(eval("(3 + ((3 + 4 / 2) - 1)) * 2").unwrap(), int(14));
	}

	#[test]
	fn literal_keeps_span() {
		let mut lexer = Lexer::new();
		for ch in "42\0".chars() {
			lexer.feed(ch).unwrap();
		}
		let node = Node::new(lexer.pop().unwrap());
		let result = eval_node(&node).unwrap();
		assert!(result.start.is_valid());
	}

	#[test]
	fn unknown_operator_node() {
		let node = Node {
			token:    Token::from(TokenType::LeftParen),
			children: vec![Node::new(int(1))],
		};
		assert!(matches!(eval_node(&node), Err(EvalError::NotImplemented(_))));
	}
}
