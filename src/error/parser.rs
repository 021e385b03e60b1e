use crate::scanner::{Token, TokenType};

/// Errors raised while parsing.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	/// Internal interpreter error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// A diagnostic in the user's source
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

/// A syntax diagnostic pointing at the token that broke the grammar.
#[derive(thiserror::Error, Debug)]
#[error("[line {line}] Error{at}: {kind}")]
pub struct ParseError {
	line: usize,
	at:   String,
	kind: ParseErrorType,
}

impl ParseError {
	pub fn new(token: &Token, kind: ParseErrorType) -> Self {
		let at = if matches!(token.r#type, TokenType::Eof) {
			" at end".to_string()
		} else {
			format!(" at '{}'", token.lexeme)
		};
		Self { line: token.line, at, kind }
	}
}

/// Types of syntax errors.
#[derive(Debug)]
pub enum ParseErrorType {
	/// A token the grammar requires is missing; `what` names it and
	/// `place` locates it ("Expect ';' after value.").
	Expect { what: &'static str, place: &'static str },
	ExpectExpression,
	InvalidAssignmentTarget,
	TooManyArguments,
	TooManyParameters,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			Expect { what, place } if place.is_empty() => write!(f, "Expect {what}."),
			Expect { what, place } => write!(f, "Expect {what} {place}."),
			ExpectExpression => write!(f, "Expect expression."),
			InvalidAssignmentTarget => write!(f, "Invalid assignment target."),
			TooManyArguments => write!(f, "Can't have more than 255 arguments."),
			TooManyParameters => write!(f, "Can't have more than 255 parameters."),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_with_lexeme() {
		let token = Token::new(TokenType::NumberLiteral(2.0), "2", 4);
		let error = ParseError::new(&token, ParseErrorType::Expect { what: "';'", place: "after value" });
		assert_eq!(error.to_string(), "[line 4] Error at '2': Expect ';' after value.");
	}

	#[test]
	fn render_at_end() {
		let token = Token::new(TokenType::Eof, "", 2);
		let error = ParseError::new(&token, ParseErrorType::ExpectExpression);
		assert_eq!(error.to_string(), "[line 2] Error at end: Expect expression.");
	}
}
