use std::{
	fs::read_to_string,
	io::{self, BufRead, BufReader, Write},
	path::Path,
	str::FromStr,
};

use anyhow::Context;

use crate::{error::RoxiError, interpreter::Interpreter, parser::Parser, scanner::Scanner};

/// Interpreter phase selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Dump the token stream one token per line and stop.
	Scan,
	/// Parse and evaluate; the default.
	Parse,
}

impl FromStr for Phase {
	type Err = RoxiError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"scan" => Ok(Phase::Scan),
			"parse" => Ok(Phase::Parse),
			_ => Err(RoxiError::Usage),
		}
	}
}

/// Front end driving the scan → parse → evaluate pipeline.
pub struct Roxi {
	phase: Phase,
}

impl Roxi {
	pub fn new(phase: Phase) -> Self {
		Self { phase }
	}

	pub fn run_file(&self, path: &Path) -> crate::Result<()> {
		let source = read_to_string(path).context("Failed open source file")?;
		let mut interpreter = Interpreter::new(BufReader::new(io::stdin()), io::stdout());
		self.run(&source, &mut interpreter)
	}

	/// Interactive prompt. One interpreter lives for the whole session,
	/// so definitions carry over from line to line; errors are reported
	/// and the loop simply continues.
	pub fn run_prompt(&self) {
		let mut interpreter = Interpreter::new(BufReader::new(io::stdin()), io::stdout());
		let mut input = String::new();
		let stdin = io::stdin();
		loop {
			input.clear();
			print!("> ");
			if let Err(e) = io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited roxi repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			match self.run(input.trim(), &mut interpreter) {
				// scanner and parser diagnostics were already reported inline
				Err(RoxiError::Runtime(e)) => eprintln!("{e}"),
				Err(RoxiError::Internal(e)) => eprintln!("{e:#}"),
				_ => {}
			}
		}
	}

	fn run<R: BufRead, W: Write>(
		&self,
		source: &str,
		interpreter: &mut Interpreter<R, W>,
	) -> crate::Result<()> {
		let tokens = Scanner::new(source).scan_tokens()?;
		match self.phase {
			Phase::Scan => {
				for token in &tokens {
					println!("{token}");
				}
				Ok(())
			}
			Phase::Parse => {
				let statements = Parser::new(tokens).parse()?;
				interpreter.interpret(&statements)
			}
		}
	}
}
