//! The calculator front end: a numbered-prompt REPL and a line-oriented file
//! runner, both generic over which evaluation pipeline sits behind the
//! [`Evaluator`] seam. Errors are reported with a caret line pointing at the
//! offending span, and every expression gets a fresh lexer/evaluator state so
//! a failed one cannot corrupt the next.

use std::{fs::read_to_string, io::Write, iter::once, path::Path};

use anyhow::{Context, anyhow};

use crate::{error::CalcError, eval::{AstEvaluator, Evaluator, TokenEvaluator}, lexer::{Lexer, Token, TokenType}, position::SourcePos};

/// Calc is the main struct for the calculator.
pub struct Calc {
	/// Use the direct token-level machine instead of the AST pipeline.
	direct: bool,
}

impl Calc {
	pub fn new(direct: bool) -> Self { Self { direct } }

	/// Evaluate each non-blank line of a file, printing one result per line.
	/// The first failing line reports its error and aborts.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CalcError> {
		let source = read_to_string(path).context("Failed open source file")?;
		if self.direct {
			run_source(&mut TokenEvaluator::new(), &source)
		} else {
			run_source(&mut AstEvaluator::new(), &source)
		}
	}

	/// Run the REPL prompt until end of input.
	pub fn run_prompt(&self) {
		if self.direct {
			prompt_loop(&mut TokenEvaluator::new());
		} else {
			prompt_loop(&mut AstEvaluator::new());
		}
	}
}

impl Default for Calc {
	fn default() -> Self { Self::new(false) }
}

/// An expression failure plus the span the caret should point at.
#[derive(Debug)]
struct LineError {
	error: CalcError,
	start: SourcePos,
	end:   SourcePos,
}

impl LineError {
	fn new(error: impl Into<CalcError>, start: SourcePos, end: SourcePos) -> Self {
		Self { error: error.into(), start, end }
	}
}

/// Feed one line, terminated by a synthesized NUL, through the lexer and
/// evaluator; the result arrives with the end marker.
fn eval_line<E: Evaluator>(lexer: &mut Lexer, evaluator: &mut E, line: &str) -> Result<Token, LineError> {
	for ch in line.chars().chain(once('\0')) {
		if let Err(error) = lexer.feed(ch) {
			let position = error.position();
			return Err(LineError::new(error, position, position));
		}
		while let Some(token) = lexer.pop() {
			let (start, end) = (token.start, token.end);
			let finished = token.r#type == TokenType::End;
			evaluator.feed(token).map_err(|error| LineError::new(error, start, end))?;
			if finished {
				return evaluator.get_result().map_err(|error| LineError::new(error, start, end));
			}
		}
	}
	let invalid = SourcePos::invalid();
	Err(LineError::new(anyhow!("line ended without the end marker"), invalid, invalid))
}

/// Point a caret (underlined with tildes for wider spans) at the offending
/// columns, then print the message. `padding` is the width of whatever
/// preceded the echoed line on screen, e.g. the prompt.
fn report_error(error: &LineError, padding: usize) {
	if error.start.is_valid() && error.end.is_valid() && error.end.column >= error.start.column {
		let offset = " ".repeat(padding + error.start.column as usize);
		let underline = "~".repeat((error.end.column - error.start.column) as usize);
		eprintln!("{offset}^{underline}");
	}
	eprintln!("{}", error.error);
}

fn prompt_loop<E: Evaluator>(evaluator: &mut E) {
	let mut lexer = Lexer::new();
	let stdin = std::io::stdin();
	let mut input = String::new();

	for count in 0.. {
		let prompt = format!("[{count}] ");
		print!("{prompt}");
		if let Err(e) = std::io::stdout().flush() {
			eprintln!("Failed flush: {e}");
		}

		input.clear();
		match stdin.read_line(&mut input) {
			Ok(0) => {
				println!("\nExited rcalc repl");
				break;
			}
			Ok(_) => {}
			Err(e) => {
				eprintln!("Failed read line: {e}");
				continue;
			}
		}

		let line = input.trim_end_matches(['\r', '\n']);
		match eval_line(&mut lexer, evaluator, line) {
			Ok(result) => println!("{}", result.r#type),
			Err(error) => report_error(&error, prompt.len()),
		}

		lexer.reset();
		evaluator.reset();
	}
}

fn run_source<E: Evaluator>(evaluator: &mut E, source: &str) -> Result<(), CalcError> {
	let mut lexer = Lexer::new();
	for line in source.lines() {
		if line.trim().is_empty() {
			continue;
		}
		match eval_line(&mut lexer, evaluator, line) {
			Ok(result) => println!("{}", result.r#type),
			Err(error) => {
				report_error(&error, 0);
				return Err(error.error);
			}
		}
		lexer.reset();
		evaluator.reset();
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn eval_line_returns_the_result() {
		let mut lexer = Lexer::new();
		let mut evaluator = AstEvaluator::new();
		let result = eval_line(&mut lexer, &mut evaluator, "1 + 2 * 3").unwrap();
		assert_eq!(result, Token::from(TokenType::Int(7)));
	}

	#[test]
	fn eval_line_error_carries_the_span() {
		let mut lexer = Lexer::new();
		let mut evaluator = AstEvaluator::new();
		// The stray `)` sits at columns 4..4.
		let error = eval_line(&mut lexer, &mut evaluator, "1 + )").unwrap_err();
		assert_eq!(error.start, SourcePos::new(0, 4));
		assert_eq!(error.end, SourcePos::new(0, 4));
		assert!(matches!(error.error, CalcError::Parser(_)));
	}

	#[test]
	fn both_pipelines_agree_through_the_seam() {
		let inputs = ["1 + 2 * 3", "(1 + 2) * 3", "7 / 2", "8 / 0"];
		for input in inputs {
			let mut lexer = Lexer::new();
			let ast = eval_line(&mut lexer, &mut AstEvaluator::new(), input).unwrap();
			lexer.reset();
			let direct = eval_line(&mut lexer, &mut TokenEvaluator::new(), input).unwrap();
			assert_eq!(ast, direct, "{input:?}");
		}
	}
}
