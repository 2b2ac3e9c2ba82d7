use crate::lang::error::{Arity, KelpResult};
use crate::lang::eval::Interpreter;
use crate::lang::expr::{KelpExpr, KelpNumber};
use crate::lang::scope::KelpScope;

use super::{expect_arg_count, expect_numbers, Builtin, KelpPlugin, PluginInfo};

pub struct MathPlugin;

impl KelpPlugin for MathPlugin {
	fn info(&self) -> PluginInfo {
		PluginInfo { name: "math", desc: "arithmetic and comparison" }
	}
	fn index(&self) -> Vec<(&'static str, Builtin)> {
		builtins![
			"+"   => add,
			"-"   => sub,
			"*"   => mul,
			"/"   => div,
			"rem" => rem,
			"="   => num_eq,
			"<"   => lt,
			"<="  => le,
			">"   => gt,
			">="  => ge,
		]
	}
}

/// arity is checked before anything is evaluated
fn eval_numbers(ip: &Interpreter, context: &str, args: &[KelpExpr], scope: &KelpScope, arity: Arity) -> KelpResult<Vec<KelpNumber>> {
	expect_arg_count(context, args, arity)?;
	expect_numbers(context, &ip.eval_all(args, scope)?)
}

// integer 0 is the identity, so the result only turns float when an operand does
fn add(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let numbers = eval_numbers(ip, "+", args, scope, Arity::at_least(0))?;
	Ok(numbers.into_iter().fold(KelpNumber::int(0.0), |a, b| a + b).into())
}

fn sub(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let numbers = eval_numbers(ip, "-", args, scope, Arity::at_least(2))?;
	Ok(numbers[1..].iter().fold(numbers[0], |a, b| a - *b).into())
}

fn mul(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let numbers = eval_numbers(ip, "*", args, scope, Arity::at_least(1))?;
	Ok(numbers[1..].iter().fold(numbers[0], |a, b| a * *b).into())
}

fn div(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let numbers = eval_numbers(ip, "/", args, scope, Arity::at_least(2))?;
	Ok(numbers[1..].iter().fold(numbers[0], |a, b| a / *b).into())
}

fn rem(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let numbers = eval_numbers(ip, "rem", args, scope, Arity::exactly(2))?;
	Ok((numbers[0] % numbers[1]).into())
}

// every adjacent pair has to pass the check
macro_rules! ensure_tonicity {
	($name:ident, $context:expr, $check_fn:expr) => {
		fn $name(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
			let numbers = eval_numbers(ip, $context, args, scope, Arity::at_least(1))?;
			let check: fn(&KelpNumber, &KelpNumber) -> bool = $check_fn;
			Ok(KelpExpr::from_bool(numbers.windows(2).all(|w| check(&w[0], &w[1]))))
		}
	};
}

ensure_tonicity!(num_eq, "=",  |a, b| a == b);
ensure_tonicity!(lt,     "<",  |a, b| a < b);
ensure_tonicity!(le,     "<=", |a, b| a <= b);
ensure_tonicity!(gt,     ">",  |a, b| a > b);
ensure_tonicity!(ge,     ">=", |a, b| a >= b);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lang::error::KelpError;
	use crate::lang::expr::{KelpType, NumberKind};
	use pretty_assertions::assert_eq;

	fn run(ip: &Interpreter, text: &str) -> KelpResult<KelpExpr> {
		ip.run_source(text).map(|mut v| v.pop().unwrap_or_else(KelpExpr::nil))
	}

	fn number(ip: &Interpreter, text: &str) -> KelpNumber {
		match run(ip, text).unwrap() {
			KelpExpr::Number(n) => n,
			other => panic!("`{}` gave {:?}", text, other),
		}
	}

	#[test]
	fn kind_inference() {
		let ip = Interpreter::new();
		let n = number(&ip, "(+ 1 2)");
		assert_eq!((n.kind, n.value), (NumberKind::Integer, 3.0));
		let n = number(&ip, "(+ 1 2.0)");
		assert_eq!((n.kind, n.value), (NumberKind::Float, 3.0));
		assert_eq!(run(&ip, "(+ 1 2.0)").unwrap().to_string(), "3.0");
		let n = number(&ip, "(+)");
		assert_eq!((n.kind, n.value), (NumberKind::Integer, 0.0));
		assert_eq!(number(&ip, "(* 1.5 2)").kind, NumberKind::Float);
		assert_eq!(number(&ip, "(rem 7 2)").kind, NumberKind::Integer);
	}

	#[test]
	fn folds_left() {
		let ip = Interpreter::new();
		assert_eq!(number(&ip, "(- 10 3 2)").value, 5.0);
		assert_eq!(number(&ip, "(/ 12 2 3)").value, 2.0);
		assert_eq!(number(&ip, "(* 2 3 4)").value, 24.0);
		assert_eq!(number(&ip, "(* 7)").value, 7.0);
		assert_eq!(number(&ip, "(rem -7 2)").value, -1.0);
	}

	#[test]
	fn integer_division_prints_truncated() {
		let ip = Interpreter::new();
		let n = number(&ip, "(/ 7 2)");
		assert_eq!(n.value, 3.5);
		assert_eq!(n.to_string(), "3");
		assert_eq!(run(&ip, "(/ 7.0 2)").unwrap().to_string(), "3.5");
	}

	#[test]
	fn arity() {
		let ip = Interpreter::new();
		assert_eq!(run(&ip, "(*)").unwrap_err(), KelpError::ArityError {
			context: "*".into(),
			got: 0,
			expected: Arity::at_least(1),
		});
		assert_eq!(run(&ip, "(- 5)").unwrap_err(), KelpError::ArityError {
			context: "-".into(),
			got: 1,
			expected: Arity::at_least(2),
		});
		assert!(matches!(run(&ip, "(rem 1 2 3)"), Err(KelpError::ArityError { .. })));
		assert!(matches!(run(&ip, "(<)"), Err(KelpError::ArityError { .. })));
	}

	#[test]
	fn arity_checked_before_evaluation() {
		let ip = Interpreter::builder().default_plugins().print_handler(crate::lang::print::PrintHandler::buffer()).build();
		assert!(run(&ip, "(- (print 1))").is_err());
		assert_eq!(ip.output(), "");
	}

	#[test]
	fn operands_must_be_numbers() {
		let ip = Interpreter::new();
		assert_eq!(run(&ip, "(+ 1 \"2\")").unwrap_err(), KelpError::InvalidType {
			context: "+".into(),
			index: 1,
			got: KelpType::String,
			expected: vec![KelpType::Number],
		});
	}

	#[test]
	fn comparisons_chain() {
		let ip = Interpreter::new();
		assert_eq!(run(&ip, "(< 1 2 3)").unwrap(), KelpExpr::truth());
		assert_eq!(run(&ip, "(< 1 3 2)").unwrap(), KelpExpr::nil());
		assert_eq!(run(&ip, "(<= 1 1 2)").unwrap(), KelpExpr::truth());
		assert_eq!(run(&ip, "(> 3 2 2)").unwrap(), KelpExpr::nil());
		assert_eq!(run(&ip, "(>= 3 2 2)").unwrap(), KelpExpr::truth());
		assert_eq!(run(&ip, "(= 2 2.0 2)").unwrap(), KelpExpr::truth());
		assert_eq!(run(&ip, "(= 5)").unwrap(), KelpExpr::truth());
	}
}
