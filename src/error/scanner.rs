/// Errors raised while scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
	/// Internal interpreter error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// A diagnostic in the user's source
	#[error(transparent)]
	ScanError(#[from] ScanError),
}

/// A lexical diagnostic tagged with the line and lexeme it points at.
#[derive(thiserror::Error, Debug)]
#[error("[line {line}] Error{at}: {kind}")]
pub struct ScanError {
	line: usize,
	at:   String,
	kind: ScanErrorType,
}

impl ScanError {
	pub fn at_lexeme(line: usize, lexeme: &str, kind: ScanErrorType) -> Self {
		Self { line, at: format!(" at '{lexeme}'"), kind }
	}

	pub fn at_end(line: usize, kind: ScanErrorType) -> Self {
		Self { line, at: " at end".to_string(), kind }
	}
}

/// Types of lexical errors.
#[derive(Debug)]
pub enum ScanErrorType {
	UnexpectedCharacter,
	UnterminatedString,
	UnterminatedBlockComment,
	/// `:` not followed by an identifier
	InvalidSymbolName,
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			UnexpectedCharacter => write!(f, "Unexpected character."),
			UnterminatedString => write!(f, "Unterminated string."),
			UnterminatedBlockComment => write!(f, "Unterminated multi-line comment."),
			InvalidSymbolName => write!(f, "Invalid symbol name after ':'."),
		}
	}
}
