/// A fault raised while evaluating; rendered as the message followed by
/// the line tag, the format the driver writes to stderr.
#[derive(thiserror::Error, Debug)]
#[error("{kind}\n[line {line}]")]
pub struct RuntimeError {
	line: usize,
	kind: RuntimeErrorType,
}

impl RuntimeError {
	pub fn new(line: usize, kind: RuntimeErrorType) -> Self {
		Self { line, kind }
	}

	pub fn line(&self) -> usize {
		self.line
	}
}

/// Types of evaluation faults.
#[derive(Debug)]
pub enum RuntimeErrorType {
	OperandMustBeNumber,
	OperandsMustBeNumbers,
	OperandsMustBeNumbersOrStrings,
	UndefinedVariable(String),
	NotCallable,
	ArityMismatch { expected: usize, got: usize },
	StringLoopOverNonString,
	/// Reading from the input stream failed
	ReadFailed,
	FloorArgument,
	SubstringFirstArgument,
	SubstringIndices,
}

impl std::fmt::Display for RuntimeErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RuntimeErrorType::*;
		match self {
			OperandMustBeNumber => write!(f, "Operand must be a number."),
			OperandsMustBeNumbers => write!(f, "Operands must be numbers."),
			OperandsMustBeNumbersOrStrings => write!(f, "Operands must be two numbers or two strings."),
			UndefinedVariable(name) => write!(f, "Undefined variable '{name}'."),
			NotCallable => write!(f, "Can only call functions and classes."),
			ArityMismatch { expected, got } => {
				write!(f, "Expected {expected} arguments but got {got}.")
			}
			StringLoopOverNonString => write!(f, "String loop can only iterate over strings."),
			ReadFailed => write!(f, "Error reading input."),
			FloorArgument => write!(f, "floor() requires a number argument."),
			SubstringFirstArgument => write!(f, "First argument must be a string."),
			SubstringIndices => write!(f, "substring error: invalid indices."),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_message_then_line_tag() {
		let error = RuntimeError::new(1, RuntimeErrorType::OperandsMustBeNumbersOrStrings);
		assert_eq!(error.to_string(), "Operands must be two numbers or two strings.\n[line 1]");
	}

	#[test]
	fn render_undefined_variable() {
		let error = RuntimeError::new(9, RuntimeErrorType::UndefinedVariable("qux".to_string()));
		assert_eq!(error.to_string(), "Undefined variable 'qux'.\n[line 9]");
	}
}
