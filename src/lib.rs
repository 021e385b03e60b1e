//! Tree-walking interpreter for Roxi, a small dynamically typed
//! scripting language in the Lox family.
//!
//! Source text flows one way through three stages:
//!
//! 1. [`scanner::Scanner`] turns the raw characters into a token stream
//!    terminated by an EOF token.
//! 2. [`parser::Parser`] consumes the tokens by recursive descent into
//!    statement nodes, synchronizing at statement boundaries so one run
//!    reports every syntax error it can reach.
//! 3. [`interpreter::Interpreter`] walks the statements against a chain
//!    of lexical environment frames.
//!
//! On top of the classic material (variables, `if`/`while`/`for`,
//! first-class functions with closures), the language adds an input
//! literal (`<-` / `read`), a deterministic pseudo-random literal
//! (`!!` / `rand`), symbol atoms (`:name`), a string-iteration loop
//! (`loop (var c in "abc") …`), and a newline-less `printonly`.
//!
//! ```
//! use std::io::Cursor;
//!
//! use roxi::{interpreter::Interpreter, parser::Parser, scanner::Scanner};
//!
//! let tokens = Scanner::new("print 1 + 2 * 3;").scan_tokens()?;
//! let statements = Parser::new(tokens).parse()?;
//!
//! let mut output = Vec::new();
//! Interpreter::new(Cursor::new(""), &mut output).interpret(&statements)?;
//! assert_eq!(output, b"7\n");
//! # Ok::<(), roxi::RoxiError>(())
//! ```

pub mod cli;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod roxi;
pub mod scanner;
pub mod statement;

pub use error::RoxiError;
pub use roxi::{Phase, Roxi};

/// Crate-wide result alias.
pub type Result<T, E = RoxiError> = std::result::Result<T, E>;
