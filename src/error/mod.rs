pub mod interpreter;
pub mod parser;
pub mod scanner;

/// RoxiError is the top-level error type for the interpreter pipeline.
#[derive(thiserror::Error, Debug)]
pub enum RoxiError {
	/// Internal interpreter error, should never happen
	#[error("InternalError: {0}")]
	Internal(#[from] anyhow::Error),
	/// The command line did not match any invocation shape
	#[error("Usage: roxi [phase] [script]")]
	Usage,
	#[error("Generated {0} scanner errors")]
	ScannerErrors(usize),
	#[error("Generated {0} parser errors")]
	ParserErrors(usize),
	#[error(transparent)]
	Runtime(#[from] interpreter::RuntimeError),
}

impl RoxiError {
	/// Process exit status for this error
	pub fn exit_code(&self) -> u8 {
		match self {
			RoxiError::Usage => 64,
			RoxiError::ScannerErrors(_) | RoxiError::ParserErrors(_) => 65,
			RoxiError::Runtime(_) => 70,
			RoxiError::Internal(_) => 1,
		}
	}
}
