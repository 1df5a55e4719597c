pub mod eval;
pub mod lexer;
pub mod parser;

/// CalcError is the top-level error type for the calculator.
///
/// Each phase failure keeps its own type; this enum is what crosses the
/// library boundary. All three phase errors abandon the current expression:
/// the caller resets the lexer and evaluator and starts over.
#[derive(thiserror::Error, Debug)]
pub enum CalcError {
	/// Internal error, should never happen
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// A character the lexer could not classify
	#[error("LexerError: {0}")]
	Lexer(#[from] lexer::LexerError),
	/// A token the grammar could not accept
	#[error("ParserError: {0}")]
	Parser(#[from] parser::ParserError),
	/// An evaluation failure
	#[error("EvalError: {0}")]
	Eval(#[from] eval::EvalError),
}
