use std::process::ExitCode;

use clap::Parser;
use roxi::{
	Roxi, RoxiError,
	cli::{Cli, Mode},
};

fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(e) => {
			// --help and --version land here too; only real parse
			// failures are usage errors
			let _ = e.print();
			if e.use_stderr() {
				return ExitCode::from(RoxiError::Usage.exit_code());
			}
			return ExitCode::SUCCESS;
		}
	};

	let mode = match cli.into_mode() {
		Ok(mode) => mode,
		Err(e) => {
			eprintln!("{e}");
			return ExitCode::from(e.exit_code());
		}
	};

	match mode {
		Mode::Repl => {
			Roxi::new(roxi::Phase::Parse).run_prompt();
			ExitCode::SUCCESS
		}
		Mode::File { phase, path } => match Roxi::new(phase).run_file(&path) {
			Ok(()) => ExitCode::SUCCESS,
			Err(e) => {
				match &e {
					// per-diagnostic lines were already written to stderr
					RoxiError::ScannerErrors(_) | RoxiError::ParserErrors(_) => {}
					other => eprintln!("{other}"),
				}
				ExitCode::from(e.exit_code())
			}
		},
	}
}
