//! native procedures
//!
//! a builtin receives its arguments unevaluated together with the calling
//! scope and decides itself what to evaluate. procedure groups are plugins:
//! each hands a name -> function table to the interpreter builder, which
//! merges them in order (a later name silently replaces an earlier one).

use std::collections::HashMap;
use std::fmt;

use super::error::{Arity, KelpError, KelpResult};
use super::eval::Interpreter;
use super::expr::{KelpExpr, KelpNumber, KelpType, NumberKind};
use super::scope::KelpScope;

pub type Builtin = fn(&Interpreter, &[KelpExpr], &KelpScope) -> KelpResult<KelpExpr>;

/// build a plugin table, coercing each function to `Builtin`
macro_rules! builtins {
	($($name:expr => $func:expr),* $(,)?) => {
		vec![$(($name, $func as $crate::lang::builtin::Builtin)),*]
	};
}

pub mod math;
pub mod misc;
pub mod quote;
pub mod string;

pub struct PluginInfo {
	pub name: &'static str,
	pub desc: &'static str,
}

/// a group of builtins contributed to the registry
pub trait KelpPlugin {
	fn info(&self) -> PluginInfo;
	fn index(&self) -> Vec<(&'static str, Builtin)>;
}

/// quote, misc, string, math
pub fn default_plugins() -> Vec<Box<dyn KelpPlugin>> {
	vec![
		Box::new(quote::QuotePlugin),
		Box::new(misc::MiscPlugin),
		Box::new(string::StringPlugin),
		Box::new(math::MathPlugin),
	]
}

#[derive(Clone, Default)]
pub struct Registry {
	table: HashMap<String, Builtin>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn register(&mut self, name: impl Into<String>, func: Builtin) {
		self.table.insert(name.into(), func);
	}
	pub fn merge(&mut self, table: impl IntoIterator<Item = (&'static str, Builtin)>) {
		for (name, func) in table {
			if self.contains(name) {
				log::debug!("builtin `{}` replaced", name);
			}
			self.register(name, func);
		}
	}
	pub fn get(&self, name: &str) -> Option<Builtin> {
		self.table.get(name).copied()
	}
	pub fn contains(&self, name: &str) -> bool {
		self.table.contains_key(name)
	}
	pub fn len(&self) -> usize {
		self.table.len()
	}
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
	/// sorted
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<_> = self.table.keys().map(|k| k.as_str()).collect();
		names.sort_unstable();
		names
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.names()).finish()
	}
}

// argument contracts shared by every builtin

pub fn expect_arg_count(context: &str, args: &[KelpExpr], expected: Arity) -> KelpResult<()> {
	if expected.contains(args.len()) {
		Ok(())
	} else {
		Err(KelpError::ArityError { context: context.to_string(), got: args.len(), expected })
	}
}

pub(crate) fn type_error(context: &str, index: usize, arg: &KelpExpr, allowed: &[KelpType]) -> KelpError {
	KelpError::InvalidType {
		context: context.to_string(),
		index,
		got: arg.get_type(),
		expected: allowed.to_vec(),
	}
}

fn nth_arg<'a>(context: &str, args: &'a [KelpExpr], index: usize) -> KelpResult<&'a KelpExpr> {
	args.get(index).ok_or_else(|| KelpError::ArityError {
		context: context.to_string(),
		got: args.len(),
		expected: Arity::at_least(index + 1),
	})
}

pub fn expect_type<'a>(context: &str, args: &'a [KelpExpr], index: usize, allowed: &[KelpType]) -> KelpResult<&'a KelpExpr> {
	let arg = nth_arg(context, args, index)?;
	if allowed.contains(&arg.get_type()) {
		Ok(arg)
	} else {
		Err(type_error(context, index, arg, allowed))
	}
}

pub fn expect_number_kind(context: &str, args: &[KelpExpr], index: usize, kind: NumberKind) -> KelpResult<KelpNumber> {
	let number = expect_number(context, args, index)?;
	if number.kind == kind {
		Ok(number)
	} else {
		Err(KelpError::InvalidNumberKind { context: context.to_string(), index, got: number.kind, expected: kind })
	}
}

pub fn expect_number(context: &str, args: &[KelpExpr], index: usize) -> KelpResult<KelpNumber> {
	match nth_arg(context, args, index)? {
		KelpExpr::Number(n) => Ok(*n),
		other => Err(type_error(context, index, other, &[KelpType::Number])),
	}
}

pub fn expect_symbol<'a>(context: &str, args: &'a [KelpExpr], index: usize) -> KelpResult<&'a str> {
	match nth_arg(context, args, index)? {
		KelpExpr::Symbol(name) => Ok(name),
		other => Err(type_error(context, index, other, &[KelpType::Symbol])),
	}
}

pub fn expect_string<'a>(context: &str, args: &'a [KelpExpr], index: usize) -> KelpResult<&'a str> {
	match nth_arg(context, args, index)? {
		KelpExpr::String(v) => Ok(v),
		other => Err(type_error(context, index, other, &[KelpType::String])),
	}
}

pub fn expect_list<'a>(context: &str, args: &'a [KelpExpr], index: usize) -> KelpResult<&'a [KelpExpr]> {
	match nth_arg(context, args, index)? {
		KelpExpr::List(v) => Ok(v),
		other => Err(type_error(context, index, other, &[KelpType::List])),
	}
}

/// evaluated arguments, all numbers
pub fn expect_numbers(context: &str, args: &[KelpExpr]) -> KelpResult<Vec<KelpNumber>> {
	(0..args.len()).map(|i| expect_number(context, args, i)).collect()
}
