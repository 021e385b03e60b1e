use std::path::PathBuf;

use clap::Parser;

use crate::{error::RoxiError, roxi::Phase};

/// CLI arguments
#[derive(Parser)]
#[command(
	name = "roxi",
	about = "Tree-walking interpreter for the Roxi scripting language",
	after_long_help = "Without arguments an interactive prompt is started."
)]
pub struct Cli {
	/// Script path, or a phase ("scan" or "parse") when a second argument follows
	pub first:  Option<String>,
	/// Script path when a phase is given
	pub second: Option<PathBuf>,
}

/// Program mode resolved from the positional arguments.
#[derive(Debug)]
pub enum Mode {
	/// Interactive prompt
	Repl,
	/// Run a script in the given phase
	File { phase: Phase, path: PathBuf },
}

impl Cli {
	pub fn into_mode(self) -> Result<Mode, RoxiError> {
		match (self.first, self.second) {
			(None, _) => Ok(Mode::Repl),
			(Some(path), None) => Ok(Mode::File { phase: Phase::Parse, path: PathBuf::from(path) }),
			(Some(phase), Some(path)) => Ok(Mode::File { phase: phase.parse()?, path }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cli(first: Option<&str>, second: Option<&str>) -> Cli {
		Cli { first: first.map(String::from), second: second.map(PathBuf::from) }
	}

	#[test]
	fn no_arguments_is_the_repl() {
		assert!(matches!(cli(None, None).into_mode().unwrap(), Mode::Repl));
	}

	#[test]
	fn one_argument_runs_the_file_in_parse_phase() {
		match cli(Some("script.rox"), None).into_mode().unwrap() {
			Mode::File { phase, path } => {
				assert_eq!(phase, Phase::Parse);
				assert_eq!(path, PathBuf::from("script.rox"));
			}
			mode => panic!("unexpected mode: {mode:?}"),
		}
	}

	#[test]
	fn two_arguments_select_the_phase() {
		match cli(Some("scan"), Some("script.rox")).into_mode().unwrap() {
			Mode::File { phase, .. } => assert_eq!(phase, Phase::Scan),
			mode => panic!("unexpected mode: {mode:?}"),
		}
	}

	#[test]
	fn unknown_phase_is_a_usage_error() {
		assert!(matches!(
			cli(Some("tokenize"), Some("script.rox")).into_mode(),
			Err(RoxiError::Usage)
		));
	}
}
