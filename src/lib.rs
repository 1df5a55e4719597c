//! # rcalc
//!
//! A streaming calculator for infix arithmetic over 64-bit integers and
//! double-precision floats, with `+ - * /`, parentheses and a leading sign.

//! ## Lexing
//!
//! The [`Lexer`] takes exactly one character per `feed` call and queues
//! completed [`Token`]s for `pop`, tracking the line/column span of every
//! token across feeds. Nothing requires the whole expression up front: a
//! caller can trickle characters in as they arrive. Feeding NUL produces the
//! `End` marker that closes an expression.

//! ## Parsing
//!
//! The [`Parser`] is a grammar automaton, not a recursive-descent parser: an
//! explicit stack of grammar states stands in for the call stack, paired with
//! a stack of partially built [`Node`]s. It accepts one token at a time, so
//! it suspends wherever the lexer does, and yields a single root node that
//! encodes precedence, left-associativity and the unary sign.

//! ## Evaluating
//!
//! Two pipelines share one set of operator implementations and numeric
//! rules: [`eval_node`] walks the tree bottom-up, while [`TokenEvaluator`]
//! consumes tokens directly against a value stack and an operator stack and
//! never builds a tree. Integer operands keep integer results whenever the
//! operation stays integral; any float operand, an uneven quotient or an
//! overflowing literal falls to float, and division by zero is positive
//! infinity rather than an error.

//! ## Errors
//!
//! Each phase has its own error type — [`LexError`] with the offending
//! character and position, [`SyntaxError`] with the offending token and the
//! acceptable set, [`EvalError`] for argument and operator failures — all
//! aggregated in [`CalcError`]. None are recoverable within an expression:
//! reset and start over.

pub mod cli;
mod calc;
mod error;
mod eval;
mod lexer;
mod parser;
mod position;

pub use calc::Calc;
pub use error::{CalcError, eval::EvalError, lexer::{LexError, LexErrorType, LexerError}, parser::{ParserError, SyntaxError}};
pub use eval::{AstEvaluator, Evaluator, TokenEvaluator, eval_node};
pub use lexer::{Lexer, Token, TokenKind, TokenType};
pub use parser::{Node, Parser};
pub use position::SourcePos;
