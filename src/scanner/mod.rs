//! Lexical analysis: one left-to-right pass over the source characters.
//!
//! The scanner keeps three cursors: `start` marks the beginning of the
//! lexeme being read, `cursor` the byte just past the character last
//! consumed, and `line` the current source line. Whitespace and comments
//! become ignored token kinds that are counted for line numbers but
//! never pushed; every diagnostic is reported where it is found and
//! scanning continues, so a single run surfaces all lexical errors.

mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub use token::*;

use crate::error::{
	RoxiError,
	scanner::{ScanError, ScanErrorType, ScannerError},
};

/// A scanner for Roxi source code.
pub struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points just past the character currently being considered
	cursor:      usize,
	/// Tracks what source line `cursor` is on so tokens know their location
	line:        usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Scan all tokens from the source code. The returned stream always
	/// ends with exactly one EOF token carrying the last observed line.
	pub fn scan_tokens(mut self) -> crate::Result<Vec<Token>> {
		let mut tokens = Vec::new();
		let mut error_count = 0;
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			match self.scan_token(&mut tokens) {
				Err(ScannerError::ScanError(e)) => {
					eprintln!("{e}");
					error_count += 1;
				}
				Err(ScannerError::InternalError(e)) => {
					return Err(e.into());
				}
				Ok(()) => {}
			}
		}
		tokens.push(Token::new(Eof, "", self.line));
		if error_count != 0 {
			return Err(RoxiError::ScannerErrors(error_count));
		}
		Ok(tokens)
	}

	/// Scan a single token from the source code.
	fn scan_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), ScannerError> {
		let next_char = self.advance().context("Unexpected EOF")?;
		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			',' => Comma,
			'.' => Dot,
			'-' => Minus,
			'+' => Plus,
			';' => Semicolon,
			'*' => Star,
			'!' => if self.match_next('!') { Rand } else if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('-') { Read } else if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'/' => if self.match_next('/') {
				while self.peek().is_some_and(|c| c != '\n') { self.advance(); }
				Comment
			} else if self.match_next('*') {
				let mut closed = false;
				while let Some(c) = self.peek() {
					if c == '*' && self.peek_second() == Some('/') {
						self.advance(); // consume '*'
						self.advance(); // consume '/'
						closed = true;
						break;
					}
					if c == '\n' { self.line += 1; }
					self.advance();
				}
				if closed { Comment } else { return Err(ScanError::at_end(self.line, ScanErrorType::UnterminatedBlockComment).into()) }
			} else { Slash },
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => { self.line += 1; NewLine }
			'"' => self.string()?,
			':' => self.symbol()?,
			c if c.is_ascii_digit() => self.number()?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			c => return Err(ScanError::at_lexeme(self.line, &c.to_string(), ScanErrorType::UnexpectedCharacter).into()),
		};

		if !r#type.is_ignored() {
			let lexeme = &self.source[self.start..self.cursor];
			tokens.push(Token::new(r#type, lexeme, self.line));
		}

		Ok(())
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> {
		self.source_iter.peek().map(|&(_, c)| c)
	}

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Scan a string literal. Embedded newlines are allowed and counted;
	/// no escape sequences are processed.
	fn string(&mut self) -> Result<TokenType, ScannerError> {
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}

		if self.peek().is_none() {
			let lexeme = self.source[self.start..self.cursor].to_string();
			return Err(ScanError::at_lexeme(self.line, &lexeme, ScanErrorType::UnterminatedString).into());
		}
		self.advance(); // The closing "
		let value = &self.source[self.start + 1..self.cursor - 1];
		Ok(StringLiteral(value.to_string()))
	}

	/// Scan a number literal. A trailing `.` without fractional digits is
	/// left for the next lexeme.
	fn number(&mut self) -> Result<TokenType, ScannerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// Look for a fractional part.
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			self.advance(); // consume '.'
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
		}

		let s = &self.source[self.start..self.cursor];
		Ok(NumberLiteral(s.parse().context("Failed to parse number literal")?))
	}

	/// Scan a `:name` symbol literal; the literal value drops the colon.
	fn symbol(&mut self) -> Result<TokenType, ScannerError> {
		if !self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
			return Err(ScanError::at_lexeme(self.line, ":", ScanErrorType::InvalidSymbolName).into());
		}
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let name = &self.source[self.start + 1..self.cursor];
		Ok(SymbolLiteral(name.to_string()))
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		TokenType::keyword_or_identifier(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scan(input: &str, ok: bool) {
		let result = Scanner::new(input).scan_tokens();
		assert_eq!(result.is_ok(), ok, "scanning {input:?}");
	}

	fn tokens(input: &str) -> Vec<Token> {
		Scanner::new(input).scan_tokens().unwrap()
	}

	#[test]
	fn scan_tokens() {
		scan("", true);
		scan("(", true);
		scan("(){}", true);
		scan(" ( ) ", true);
		scan("@", false);
		scan("你好", false);
		scan(r#""世界""#, true);
		scan("12345", true);
		scan("// Comment", true);
		scan("/* Unterminated comment ", false);
		scan("user", true);
		scan("return", true);
	}

	#[test]
	fn scan_operators() {
		scan("!", true);
		scan("!=", true);
		scan("==", true);
		scan("<=", true);
		scan(">=", true);
		scan("- + * / ; , .", true);
	}

	#[test]
	fn scan_extension_operators() {
		assert_eq!(tokens("!!")[0].r#type, Rand);
		assert_eq!(tokens("!!")[0].lexeme, "!!");
		assert_eq!(tokens("<-")[0].r#type, Read);
		assert_eq!(tokens("<-")[0].lexeme, "<-");
		// `!!=` reads as `!!` then `=`, maximal munch from the left
		let stream = tokens("!!=");
		assert_eq!(stream[0].r#type, Rand);
		assert_eq!(stream[1].r#type, Equal);
		// `<` only pairs with `-` or `=`
		let stream = tokens("<->");
		assert_eq!(stream[0].r#type, Read);
		assert_eq!(stream[1].r#type, Greater);
	}

	#[test]
	fn scan_symbols() {
		assert_eq!(tokens(":north")[0].r#type, SymbolLiteral("north".to_string()));
		assert_eq!(tokens(":north")[0].lexeme, ":north");
		assert_eq!(tokens(":_private2")[0].r#type, SymbolLiteral("_private2".to_string()));
		// symbol name continues through digits but must not start with one
		scan(":9lives", false);
		scan(": ", false);
		scan(":", false);
	}

	#[test]
	fn scan_numbers() {
		assert_eq!(tokens("42")[0].r#type, NumberLiteral(42.0));
		assert_eq!(tokens("3.14")[0].r#type, NumberLiteral(3.14));
		// a trailing dot is not part of the number
		let stream = tokens("1.");
		assert_eq!(stream[0].r#type, NumberLiteral(1.0));
		assert_eq!(stream[1].r#type, Dot);
		let stream = tokens(".5");
		assert_eq!(stream[0].r#type, Dot);
		assert_eq!(stream[1].r#type, NumberLiteral(5.0));
	}

	#[test]
	fn scan_strings() {
		assert_eq!(tokens(r#""hello""#)[0].r#type, StringLiteral("hello".to_string()));
		assert_eq!(tokens(r#""""#)[0].r#type, StringLiteral(String::new()));
		scan(r#""unterminated"#, false);
	}

	#[test]
	fn scan_string_with_newlines() {
		let stream = tokens("\"hello\nworld\"");
		assert_eq!(stream[0].r#type, StringLiteral("hello\nworld".to_string()));
		// the token carries the line where the literal closed
		assert_eq!(stream[0].line, 2);
	}

	#[test]
	fn scan_keywords() {
		for keyword in [
			"and", "class", "else", "false", "for", "fun", "if", "nil", "or", "print", "printonly",
			"return", "super", "this", "true", "var", "while", "read", "rand", "loop", "in",
		] {
			assert!(
				!matches!(tokens(keyword)[0].r#type, Identifier(_)),
				"{keyword} must not scan as an identifier"
			);
		}
	}

	#[test]
	fn scan_identifiers() {
		scan("x", true);
		scan("_name", true);
		scan("myVariable123", true);
		assert_eq!(tokens("loops")[0].r#type, Identifier("loops".to_string()));
		assert_eq!(tokens("randX")[0].r#type, Identifier("randX".to_string()));
	}

	#[test]
	fn scan_comments() {
		scan("// single line comment", true);
		scan("/* block comment */", true);
		scan("/* multi\nline\ncomment */", true);
		scan("/** nested ** comment **/", true);
		scan("/* unterminated", false);
		assert_eq!(tokens("1 // trailing\n2").len(), 3);
	}

	#[test]
	fn always_ends_with_single_eof() {
		for input in ["", "var x = 1;", "1 + 2", "// comment only", "\n\n\n"] {
			let stream = tokens(input);
			assert_eq!(stream.last().unwrap().r#type, Eof);
			assert_eq!(stream.iter().filter(|t| t.r#type == Eof).count(), 1);
		}
	}

	#[test]
	fn eof_carries_last_line() {
		let stream = tokens("1\n2\n3");
		assert_eq!(stream.last().unwrap().line, 3);
	}

	#[test]
	fn lines_counted_inside_block_comments() {
		let stream = tokens("/* a\nb */ 7");
		assert_eq!(stream[0].r#type, NumberLiteral(7.0));
		assert_eq!(stream[0].line, 2);
	}

	#[test]
	fn scan_multiple_tokens() {
		let stream = tokens("1 + 2");
		assert_eq!(stream.len(), 4);
		assert_eq!(stream[0].r#type, NumberLiteral(1.0));
		assert_eq!(stream[1].r#type, Plus);
		assert_eq!(stream[2].r#type, NumberLiteral(2.0));
		assert_eq!(stream[3].r#type, Eof);
	}

	#[test]
	fn unexpected_characters_do_not_stop_the_scan() {
		// both offenders are reported, the surrounding tokens survive
		match Scanner::new("var @ x # y").scan_tokens() {
			Err(RoxiError::ScannerErrors(count)) => assert_eq!(count, 2),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn scan_combined() {
		scan("var x = 42;", true);
		scan("if (x < 10) { x = x + 1; }", true);
		scan("loop (var ch in \"abc\") { printonly ch; }", true);
		scan("var answer = <- ;", true);
		scan("var dice = !! ;", true);
	}
}
