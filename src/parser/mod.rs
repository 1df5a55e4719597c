//! Grammar automaton for infix expressions.
//!
//! Grammar (precedence low to high, both levels left-associative; a leading
//! sign binds a whole term):
//!
//! ``` BNF
//! expr   → ( "+" | "-" )? term ( ( "+" | "-" ) term )* ;
//! term   → factor ( ( "*" | "/" ) factor )* ;
//! factor → "(" expr ")" | NUMBER ;
//! ```
//!
//! The automaton recognizes this recursive grammar without host-stack
//! recursion, so feeding can suspend between any two tokens: an explicit
//! stack of [`ParserState`] labels holds what a recursive-descent call stack
//! would, paired with a stack of in-progress nodes. Entering a nested
//! production pushes a state on top of its caller's; completing one pops it.
//! [`Parser::feed`] drives one token through as many transitions as it takes,
//! re-dispatching the token to whatever state is exposed after each pop or
//! rewrite until some state consumes it.
//!
//! Left-associativity falls out of the continuation states: each one wraps
//! the previously completed fragment as the *left* child of the new operator
//! node, never the right.

mod node;

use anyhow::{Context, anyhow};

use crate::{error::parser::{ParserError, SyntaxError}, lexer::{Token, TokenKind, TokenType}};
pub use node::Node;

#[derive(Debug, Clone, Copy)]
enum ParserState {
	/// Expression entry: an optional leading sign, then a term.
	Expr,
	/// A leading sign's term is in progress; attach it when it completes.
	ExprSigned,
	/// A complete fragment is on the node stack; `+`/`-` may extend it.
	ExprCont,
	/// A binary `+`/`-`'s right term is in progress; attach when complete.
	ExprRhs,
	/// Term entry.
	Term,
	/// A complete factor is on the node stack; `*`/`/` may extend it.
	TermCont,
	/// A binary `*`/`/`'s right factor is in progress; attach when complete.
	TermRhs,
	/// Factor entry: a parenthesized expression or a number literal.
	Factor,
	/// The parenthesized expression is complete; only `)` may follow.
	FactorRparen,
}

/// The expression parser. Feed tokens with [`feed`](Self::feed); after the
/// [`End`](TokenType::End) token has been accepted,
/// [`get_result`](Self::get_result) yields the root node. Construct a fresh
/// parser to start over.
pub struct Parser {
	states: Vec<ParserState>,
	nodes:  Vec<Node>,
}

impl Parser {
	pub fn new() -> Self { Self { states: vec![ParserState::Expr], nodes: Vec::new() } }

	/// Drive the automaton with one token.
	///
	/// A token the current grammar state cannot accept raises a
	/// [`SyntaxError`] naming the acceptable token types; the parser is then
	/// unusable for this expression and should be discarded.
	pub fn feed(&mut self, token: Token) -> Result<(), ParserError> {
		use ParserState::*;
		loop {
			let Some(&state) = self.states.last() else {
				// Grammar fully unwound: only the end marker is acceptable.
				return match token.r#type {
					TokenType::End if self.nodes.len() == 1 => Ok(()),
					TokenType::End => {
						Err(anyhow!("parse completed with {} root nodes", self.nodes.len()).into())
					}
					_ => Err(self.mismatch(&[TokenKind::End], token)),
				};
			};

			match state {
				Expr => {
					if matches!(token.r#type, TokenType::Plus | TokenType::Minus) {
						self.nodes.push(Node::new(token));
						self.replace_top(ExprSigned);
						self.enter_term();
						return Ok(());
					}
					self.replace_top(ExprCont);
					self.enter_term();
				}
				ExprSigned => {
					self.attach_operand()?;
					self.replace_top(ExprCont);
				}
				ExprCont => {
					if matches!(token.r#type, TokenType::Plus | TokenType::Minus) {
						self.wrap_left(Node::new(token))?;
						self.replace_top(ExprRhs);
						self.enter_term();
						return Ok(());
					}
					self.states.pop();
				}
				ExprRhs => {
					self.attach_operand()?;
					self.replace_top(ExprCont);
				}
				Term => self.replace_top(TermCont),
				TermCont => {
					if matches!(token.r#type, TokenType::Star | TokenType::Slash) {
						self.wrap_left(Node::new(token))?;
						self.replace_top(TermRhs);
						self.enter_factor();
						return Ok(());
					}
					self.states.pop();
				}
				TermRhs => {
					self.attach_operand()?;
					self.replace_top(TermCont);
				}
				Factor => match token.r#type {
					TokenType::LeftParen => {
						self.replace_top(FactorRparen);
						self.enter_expr();
						return Ok(());
					}
					TokenType::Int(_) | TokenType::Float(_) => {
						self.nodes.push(Node::new(token));
						self.states.pop();
						return Ok(());
					}
					_ => {
						return Err(self.mismatch(
							&[TokenKind::LeftParen, TokenKind::Int, TokenKind::Float],
							token,
						));
					}
				},
				FactorRparen => {
					if token.r#type == TokenType::RightParen {
						self.states.pop();
						return Ok(());
					}
					return Err(self.mismatch(&[TokenKind::RightParen], token));
				}
			}
		}
	}

	/// Extract the finished tree. Calling this before the end marker has been
	/// accepted is caller misuse and reports through the internal-error
	/// channel, not as a syntax error.
	pub fn get_result(&mut self) -> Result<Node, ParserError> {
		if !self.states.is_empty() {
			return Err(anyhow!("expression is not complete").into());
		}
		if self.nodes.len() != 1 {
			return Err(anyhow!("parse produced {} root nodes", self.nodes.len()).into());
		}
		Ok(self.nodes.pop().context("parse produced no root node")?)
	}

	fn mismatch(&self, expected: &[TokenKind], got: Token) -> ParserError {
		SyntaxError::new(expected.to_vec(), got).into()
	}

	fn replace_top(&mut self, state: ParserState) {
		if let Some(top) = self.states.last_mut() {
			*top = state;
		}
	}

	fn enter_expr(&mut self) { self.states.push(ParserState::Expr); }

	fn enter_term(&mut self) {
		self.states.push(ParserState::Term);
		self.enter_factor();
	}

	fn enter_factor(&mut self) { self.states.push(ParserState::Factor); }

	/// A nested production just completed: pop its node and append it to the
	/// operator node below, which has been waiting for this operand.
	fn attach_operand(&mut self) -> Result<(), ParserError> {
		let child = self.nodes.pop().context("no operand node to attach")?;
		let parent = self.nodes.last_mut().context("no operator node to receive an operand")?;
		parent.children.push(child);
		Ok(())
	}

	/// Replace the completed fragment on top of the node stack with `head`,
	/// making the fragment its left child.
	fn wrap_left(&mut self, mut head: Node) -> Result<(), ParserError> {
		let left = self.nodes.pop().context("no completed fragment to extend")?;
		head.children.push(left);
		self.nodes.push(head);
		Ok(())
	}
}

impl Default for Parser {
	fn default() -> Self { Self::new() }
}
