//! Tree-walking evaluation of the parsed statements.
//!
//! The interpreter keeps a pointer to the current environment frame.
//! Blocks, function calls, and string-loop iterations each push a fresh
//! child frame and restore the previous one on every exit path,
//! including unwinding, so a fault deep inside a call never leaves the
//! interpreter in a half-entered scope.
//!
//! Evaluation order is left to right everywhere: operands before the
//! operator combines them, the callee before its arguments, arguments in
//! source order.
//!
//! Input and output are injected (`BufRead` / `Write`) so the `read`
//! literal and the print statements can be exercised in tests with plain
//! buffers; the binary passes stdin and stdout.

pub mod callable;
pub mod value;

use std::{
	io::{BufRead, Write},
	mem,
	rc::Rc,
};

use callable::{CallableKind, CallableValue, native};
use value::Value;

use crate::{
	environment::Environment,
	error::interpreter::{RuntimeError, RuntimeErrorType},
	parser::expression::{Expression, LiteralValue},
	scanner::{Token, TokenType},
	statement::{Function, Statement},
};

/// The values `rand` cycles through; deterministic across runs.
const RANDOM_SEQUENCE: [f64; 12] = [57.0, 97.0, 28.0, 7.0, 71.0, 1.0, 79.0, 83.0, 64.0, 82.0, 89.0, 24.0];

/// Non-local exits unwinding the evaluation stack.
///
/// `Return` is ordinary control flow, not a fault: it is caught at the
/// function-call boundary and never reported. `Io` carries a failed
/// write on the output stream up to the driver.
pub enum Unwind {
	Error(RuntimeError),
	Return(Value),
	Io(std::io::Error),
}

impl From<RuntimeError> for Unwind {
	fn from(error: RuntimeError) -> Self {
		Unwind::Error(error)
	}
}

impl From<std::io::Error> for Unwind {
	fn from(error: std::io::Error) -> Self {
		Unwind::Io(error)
	}
}

/// Tree-walking evaluator with a current-environment pointer.
pub struct Interpreter<R, W> {
	environment: Rc<Environment>,
	input:       R,
	output:      W,
	/// Position in [`RANDOM_SEQUENCE`]; per instance, so embedders can
	/// run several interpreters with independent sequences.
	rand_index:  usize,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
	pub fn new(input: R, output: W) -> Self {
		let globals = Environment::global();
		for (name, arity, function) in native::all() {
			globals.define(name, Value::Callable(Rc::new(CallableValue::native(name, arity, function))));
		}
		Self { environment: globals, input, output, rand_index: 0 }
	}

	/// Execute a batch of statements against the accumulated global
	/// state. The first runtime fault stops the batch and is returned
	/// for the driver to report; a stray top-level `return` just stops
	/// the batch.
	pub fn interpret(&mut self, statements: &[Statement]) -> crate::Result<()> {
		for statement in statements {
			match self.execute(statement) {
				Ok(()) => {}
				Err(Unwind::Return(_)) => break,
				Err(Unwind::Error(error)) => return Err(error.into()),
				Err(Unwind::Io(error)) => {
					return Err(anyhow::Error::from(error).context("Failed write output").into());
				}
			}
		}
		Ok(())
	}

	fn execute(&mut self, statement: &Statement) -> Result<(), Unwind> {
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
			Statement::Print(expression) => {
				let value = self.evaluate(expression)?;
				writeln!(self.output, "{value}")?;
			}
			Statement::PrintOnly(expression) => {
				let value = self.evaluate(expression)?;
				write!(self.output, "{value}")?;
				self.output.flush()?;
			}
			Statement::VarDeclaration { name_token, initializer } => {
				let value = match initializer {
					Some(expression) => self.evaluate(expression)?,
					None => Value::Nil,
				};
				self.environment.define(&name_token.lexeme, value);
			}
			Statement::Block(statements) => {
				let frame = Environment::with_enclosing(Rc::clone(&self.environment));
				self.execute_block(statements, frame)?;
			}
			Statement::If { condition, then_branch, else_branch } => {
				if self.evaluate(condition)?.is_truthy() {
					self.execute(then_branch)?;
				} else if let Some(else_branch) = else_branch {
					self.execute(else_branch)?;
				}
			}
			Statement::While { condition, body } => {
				while self.evaluate(condition)?.is_truthy() {
					self.execute(body)?;
				}
			}
			Statement::StringLoop { name_token, iterable, body } => {
				let Value::Str(text) = self.evaluate(iterable)? else {
					return Err(RuntimeError::new(
						name_token.line,
						RuntimeErrorType::StringLoopOverNonString,
					)
					.into());
				};
				for character in text.chars() {
					let frame = Environment::with_enclosing(Rc::clone(&self.environment));
					frame.define(&name_token.lexeme, Value::Str(character.to_string()));
					self.execute_block(std::slice::from_ref(body.as_ref()), frame)?;
				}
			}
			Statement::FunDecl(Function { name_token, parameters, body }) => {
				// capture the frame current at the declaration
				let callable = CallableValue::declared(
					&name_token.lexeme,
					Rc::clone(parameters),
					Rc::clone(body),
					Rc::clone(&self.environment),
				);
				self.environment.define(&name_token.lexeme, Value::Callable(Rc::new(callable)));
			}
			Statement::Return { value, .. } => {
				let value = match value {
					Some(expression) => self.evaluate(expression)?,
					None => Value::Nil,
				};
				return Err(Unwind::Return(value));
			}
		}
		Ok(())
	}

	/// Run `statements` inside `frame`, restoring the previous frame on
	/// every exit path, unwinding included.
	fn execute_block(&mut self, statements: &[Statement], frame: Rc<Environment>) -> Result<(), Unwind> {
		let previous = mem::replace(&mut self.environment, frame);
		let result = statements.iter().try_for_each(|statement| self.execute(statement));
		self.environment = previous;
		result
	}

	fn evaluate(&mut self, expression: &Expression) -> Result<Value, Unwind> {
		match expression {
			Expression::Literal(literal) => Ok(match literal {
				LiteralValue::Nil => Value::Nil,
				LiteralValue::Boolean(b) => Value::Boolean(*b),
				LiteralValue::Number(n) => Value::Number(*n),
				LiteralValue::String(s) => Value::Str(s.clone()),
			}),
			Expression::Grouping(inner) => self.evaluate(inner),
			Expression::Unary { operator, right } => {
				let right = self.evaluate(right)?;
				match operator.r#type {
					TokenType::Bang => Ok(Value::Boolean(!right.is_truthy())),
					// unary minus; the parser builds nothing else here
					_ => match right {
						Value::Number(n) => Ok(Value::Number(-n)),
						_ => Err(RuntimeError::new(operator.line, RuntimeErrorType::OperandMustBeNumber)
							.into()),
					},
				}
			}
			Expression::Binary { left, operator, right } => {
				let left = self.evaluate(left)?;
				let right = self.evaluate(right)?;
				binary_operation(&left, operator, &right).map_err(Unwind::Error)
			}
			Expression::Logical { left, operator, right } => {
				let left = self.evaluate(left)?;
				// short-circuit: yield the operand that decided, untouched
				match operator.r#type {
					TokenType::Or if left.is_truthy() => Ok(left),
					TokenType::And if !left.is_truthy() => Ok(left),
					_ => self.evaluate(right),
				}
			}
			Expression::Variable(token) => self.environment.get(token).map_err(Into::into),
			Expression::Assign { name, value } => {
				let value = self.evaluate(value)?;
				self.environment.assign(name, value.clone())?;
				Ok(value)
			}
			Expression::Call { callee, paren, arguments } => {
				let callee = self.evaluate(callee)?;
				let mut evaluated = Vec::with_capacity(arguments.len());
				for argument in arguments {
					evaluated.push(self.evaluate(argument)?);
				}
				self.call(&callee, paren, &evaluated)
			}
			Expression::DynamicLiteral(token) => match token.r#type {
				TokenType::Read => self.read_input(token),
				_ => Ok(self.next_rand()),
			},
			// a symbol is a colon-prefixed string atom
			Expression::Symbol(name) => Ok(Value::Str(format!(":{name}"))),
		}
	}

	fn call(&mut self, callee: &Value, paren: &Token, arguments: &[Value]) -> Result<Value, Unwind> {
		let Value::Callable(callable) = callee else {
			return Err(RuntimeError::new(paren.line, RuntimeErrorType::NotCallable).into());
		};
		if arguments.len() != callable.arity() {
			return Err(RuntimeError::new(
				paren.line,
				RuntimeErrorType::ArityMismatch { expected: callable.arity(), got: arguments.len() },
			)
			.into());
		}
		match callable.kind() {
			CallableKind::Native { function, .. } => {
				function(arguments).map_err(|kind| RuntimeError::new(paren.line, kind).into())
			}
			CallableKind::Declared { parameters, body, closure } => {
				// parameters bind in a fresh frame on the captured closure,
				// not on the caller's frame
				let frame = Environment::with_enclosing(Rc::clone(closure));
				for (parameter, argument) in parameters.iter().zip(arguments) {
					frame.define(&parameter.lexeme, argument.clone());
				}
				match self.execute_block(body.as_slice(), frame) {
					Ok(()) => Ok(Value::Nil),
					Err(Unwind::Return(value)) => Ok(value),
					Err(unwind) => Err(unwind),
				}
			}
		}
	}

	/// Evaluate a `read` literal: prompt, take one line from the input
	/// stream, and hand back its trimmed text; end of input is `""`.
	fn read_input(&mut self, token: &Token) -> Result<Value, Unwind> {
		write!(self.output, "input required > ")?;
		self.output.flush()?;
		let mut line = String::new();
		match self.input.read_line(&mut line) {
			Ok(0) => Ok(Value::Str(String::new())),
			Ok(_) => Ok(Value::Str(line.trim().to_string())),
			Err(_) => Err(RuntimeError::new(token.line, RuntimeErrorType::ReadFailed).into()),
		}
	}

	fn next_rand(&mut self) -> Value {
		let value = RANDOM_SEQUENCE[self.rand_index];
		self.rand_index = (self.rand_index + 1) % RANDOM_SEQUENCE.len();
		Value::Number(value)
	}
}

/// Combine two evaluated operands; errors carry the operator's line.
fn binary_operation(left: &Value, operator: &Token, right: &Value) -> Result<Value, RuntimeError> {
	use TokenType::*;
	match operator.r#type {
		Plus => match (left, right) {
			(Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
			// a string on the left concatenates the stringified right
			(Value::Str(l), r) => Ok(Value::Str(format!("{l}{r}"))),
			_ => Err(RuntimeError::new(operator.line, RuntimeErrorType::OperandsMustBeNumbersOrStrings)),
		},
		EqualEqual => Ok(Value::Boolean(left.equals(right))),
		BangEqual => Ok(Value::Boolean(!left.equals(right))),
		_ => {
			let (l, r) = number_operands(operator, left, right)?;
			Ok(match operator.r#type {
				Minus => Value::Number(l - r),
				Star => Value::Number(l * r),
				// division by zero follows IEEE-754 double semantics
				Slash => Value::Number(l / r),
				Greater => Value::Boolean(l > r),
				GreaterEqual => Value::Boolean(l >= r),
				Less => Value::Boolean(l < r),
				// LessEqual; the parser builds no other binary operator
				_ => Value::Boolean(l <= r),
			})
		}
	}
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
	match (left, right) {
		(Value::Number(l), Value::Number(r)) => Ok((*l, *r)),
		_ => Err(RuntimeError::new(operator.line, RuntimeErrorType::OperandsMustBeNumbers)),
	}
}
