use clap::Parser;
use rcalc::{Calc, cli::{Cli, Mode}};

fn main() {
	let cli = Cli::parse();
	let calc = Calc::new(cli.direct);

	match cli.mode {
		Mode::File { path } => {
			if let Err(e) = calc.run_file(&path) {
				eprintln!("Failed run file: {e}");
			}
		}
		Mode::Repl => calc.run_prompt(),
	}
}
