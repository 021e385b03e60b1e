use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
	error::interpreter::{RuntimeError, RuntimeErrorType},
	interpreter::value::Value,
	scanner::Token,
};

/// One lexical scope: a map of bindings plus a link to the enclosing
/// scope.
///
/// Frames are shared through `Rc` because a function value keeps the
/// frame that was current at its declaration alive for as long as the
/// function itself lives, well past the textual end of the block.
#[derive(Debug, Default)]
pub struct Environment {
	enclosing: Option<Rc<Environment>>,
	bindings:  RefCell<HashMap<String, Value>>,
}

impl Environment {
	/// The root frame; built-ins are defined here.
	pub fn global() -> Rc<Self> {
		Rc::new(Self::default())
	}

	pub fn with_enclosing(enclosing: Rc<Environment>) -> Rc<Self> {
		Rc::new(Self { enclosing: Some(enclosing), bindings: RefCell::new(HashMap::new()) })
	}

	/// Bind a name in this frame, shadowing any enclosing binding of the
	/// same name. Redefining in the same frame is allowed and replaces.
	pub fn define(&self, name: impl Into<String>, value: Value) {
		self.bindings.borrow_mut().insert(name.into(), value);
	}

	/// Look a name up, walking outward through the frame chain.
	pub fn get(&self, name_token: &Token) -> Result<Value, RuntimeError> {
		if let Some(value) = self.bindings.borrow().get(&name_token.lexeme) {
			return Ok(value.clone());
		}
		match &self.enclosing {
			Some(enclosing) => enclosing.get(name_token),
			None => Err(RuntimeError::new(
				name_token.line,
				RuntimeErrorType::UndefinedVariable(name_token.lexeme.clone()),
			)),
		}
	}

	/// Rebind the nearest existing definition of a name; unlike `define`
	/// this never creates a binding.
	pub fn assign(&self, name_token: &Token, value: Value) -> Result<(), RuntimeError> {
		{
			let mut bindings = self.bindings.borrow_mut();
			if let Some(slot) = bindings.get_mut(&name_token.lexeme) {
				*slot = value;
				return Ok(());
			}
		}
		match &self.enclosing {
			Some(enclosing) => enclosing.assign(name_token, value),
			None => Err(RuntimeError::new(
				name_token.line,
				RuntimeErrorType::UndefinedVariable(name_token.lexeme.clone()),
			)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::TokenType;

	fn name(lexeme: &str) -> Token {
		Token::new(TokenType::Identifier(lexeme.to_string()), lexeme, 1)
	}

	#[test]
	fn define_then_get() {
		let env = Environment::global();
		env.define("x", Value::Number(1.0));
		assert!(env.get(&name("x")).unwrap().equals(&Value::Number(1.0)));
	}

	#[test]
	fn get_walks_the_chain() {
		let outer = Environment::global();
		outer.define("x", Value::Number(1.0));
		let inner = Environment::with_enclosing(outer);
		assert!(inner.get(&name("x")).unwrap().equals(&Value::Number(1.0)));
	}

	#[test]
	fn define_shadows_without_touching_outer() {
		let outer = Environment::global();
		outer.define("x", Value::Number(1.0));
		let inner = Environment::with_enclosing(Rc::clone(&outer));
		inner.define("x", Value::Number(2.0));
		assert!(inner.get(&name("x")).unwrap().equals(&Value::Number(2.0)));
		assert!(outer.get(&name("x")).unwrap().equals(&Value::Number(1.0)));
	}

	#[test]
	fn assign_writes_the_nearest_existing_binding() {
		let outer = Environment::global();
		outer.define("x", Value::Number(1.0));
		let inner = Environment::with_enclosing(Rc::clone(&outer));
		inner.assign(&name("x"), Value::Number(5.0)).unwrap();
		assert!(outer.get(&name("x")).unwrap().equals(&Value::Number(5.0)));
	}

	#[test]
	fn missing_names_fail_at_the_root() {
		let env = Environment::global();
		assert!(env.get(&name("ghost")).is_err());
		assert!(env.assign(&name("ghost"), Value::Nil).is_err());
	}
}
