use Expression::*;

use crate::scanner::{Token, TokenType};

/// Expression nodes produced by the parser.
#[derive(Debug)]
pub enum Expression {
	Literal(LiteralValue),
	Unary { operator: Token, right: Box<Expression> },
	Binary { left: Box<Expression>, operator: Token, right: Box<Expression> },
	/// `and` / `or`; kept apart from `Binary` because evaluation
	/// short-circuits.
	Logical { left: Box<Expression>, operator: Token, right: Box<Expression> },
	Grouping(Box<Expression>),
	Variable(Token),
	Assign { name: Token, value: Box<Expression> },
	/// The closing parenthesis locates arity and callability faults.
	Call { callee: Box<Expression>, paren: Token, arguments: Vec<Expression> },
	/// `read` / `rand` in expression position; the value only appears at
	/// evaluation time.
	DynamicLiteral(Token),
	/// A `:name` atom.
	Symbol(String),
}

impl Expression {
	pub fn boxed(self) -> Box<Self> {
		Box::new(self)
	}
}

#[derive(Debug)]
pub enum LiteralValue {
	Nil,
	Boolean(bool),
	Number(f64),
	String(String),
}

/// Conversion used by the parser for tokens that are complete primary
/// expressions on their own. Other tokens are a caller bug, not a
/// user-facing diagnostic.
impl TryFrom<Token> for Expression {
	type Error = anyhow::Error;

	fn try_from(token: Token) -> Result<Self, Self::Error> {
		Ok(match token.r#type {
			TokenType::False => Literal(LiteralValue::Boolean(false)),
			TokenType::True => Literal(LiteralValue::Boolean(true)),
			TokenType::Nil => Literal(LiteralValue::Nil),
			TokenType::NumberLiteral(n) => Literal(LiteralValue::Number(n)),
			TokenType::StringLiteral(s) => Literal(LiteralValue::String(s)),
			TokenType::SymbolLiteral(name) => Symbol(name),
			TokenType::Identifier(_) => Variable(token),
			other => anyhow::bail!("token {other:?} does not start a primary expression"),
		})
	}
}

impl std::fmt::Display for Expression {
	/// The s-expression rendering used by the parser tests.
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal(literal) => write!(f, "{literal}"),
			Unary { operator, right } => write!(f, "({} {})", operator.lexeme, right),
			Binary { left, operator, right } | Logical { left, operator, right } => {
				write!(f, "({} {} {})", operator.lexeme, left, right)
			}
			Grouping(expression) => write!(f, "(group {expression})"),
			Variable(token) => write!(f, "{}", token.lexeme),
			Assign { name, value } => write!(f, "(= {} {})", name.lexeme, value),
			Call { callee, arguments, .. } => {
				write!(f, "(call {callee}")?;
				for argument in arguments {
					write!(f, " {argument}")?;
				}
				write!(f, ")")
			}
			DynamicLiteral(token) => match token.r#type {
				TokenType::Read => write!(f, "(read)"),
				_ => write!(f, "(rand)"),
			},
			Symbol(name) => write!(f, ":{name}"),
		}
	}
}

impl std::fmt::Display for LiteralValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LiteralValue::Nil => write!(f, "nil"),
			LiteralValue::Boolean(b) => write!(f, "{b}"),
			LiteralValue::Number(n) => write!(f, "{n}"),
			LiteralValue::String(s) => write!(f, "\"{s}\""),
		}
	}
}
