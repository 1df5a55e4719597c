use crate::lexer::TokenKind;

/// Errors that can occur while evaluating an expression.
///
/// Division by zero is deliberately absent: it evaluates to positive
/// infinity, not an error.
#[derive(thiserror::Error, Debug)]
pub enum EvalError {
	/// The value stack ran dry while an operator collected its arguments
	#[error("missing argument: expected {expected} arguments, only {available} available")]
	MissingArgument { expected: usize, available: usize },
	/// An operand of a type the operator does not accept
	#[error("argument type mismatch: expected '{expected}', got '{got}'")]
	TypeMismatch { expected: String, got: TokenKind },
	/// An operator applied to a number of operands outside its signature
	#[error("operator '{op}' cannot take {got} arguments")]
	WrongArity { op: TokenKind, got: usize },
	/// An operator token with no entry in the builtin table
	#[error("operation '{0}' is not implemented")]
	NotImplemented(TokenKind),
	/// A `(` that was never closed when the end marker arrived
	#[error("unclosed left parenthesis")]
	UnclosedParenthesis,
	/// The end marker arrived with no value on the stack
	#[error("no result")]
	NoResult,
	/// A result was requested before the expression resolved to one value
	#[error("expression is not finished")]
	NotFinished,
	/// A token with no precedence reached the operator stack
	#[error("unknown precedence for token '{0}'")]
	UnknownPrecedence(TokenKind),
}
