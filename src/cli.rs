use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rcalc", about = "A streaming infix arithmetic calculator")]
pub struct Cli {
	/// Evaluate with the direct token-level machine instead of the AST pipeline
	#[arg(short, long)]
	pub direct: bool,
	#[command(subcommand)]
	pub mode:   Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Evaluate each line of a file
	File { path: PathBuf },
	/// Read expressions interactively
	Repl,
}
