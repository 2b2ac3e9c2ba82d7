use crate::lang::error::{Arity, KelpResult};
use crate::lang::eval::Interpreter;
use crate::lang::expr::{KelpExpr, NumberKind};
use crate::lang::scope::KelpScope;

use super::{expect_arg_count, expect_number_kind, expect_string, Builtin, KelpPlugin, PluginInfo};

pub struct StringPlugin;

impl KelpPlugin for StringPlugin {
	fn info(&self) -> PluginInfo {
		PluginInfo { name: "string", desc: "text and output" }
	}
	fn index(&self) -> Vec<(&'static str, Builtin)> {
		builtins![
			"to-symbol" => to_symbol,
			"print"     => print,
			"concat"    => concat,
			"char"      => char_at,
			"upcase"    => upcase,
			"downcase"  => downcase,
		]
	}
}

fn eval_args(ip: &Interpreter, context: &str, args: &[KelpExpr], scope: &KelpScope, arity: Arity) -> KelpResult<Vec<KelpExpr>> {
	expect_arg_count(context, args, arity)?;
	ip.eval_all(args, scope)
}

fn to_symbol(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "to-symbol", args, scope, Arity::exactly(1))?;
	Ok(KelpExpr::symbol(expect_string("to-symbol", &values, 0)?))
}

/// writes the description, strings keep their quotes
fn print(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("print", args, Arity::exactly(1))?;
	let value = ip.eval(&args[0], scope)?;
	ip.printer().println(&value.to_string());
	Ok(value)
}

fn concat(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "concat", args, scope, Arity::at_least(1))?;
	let mut out = String::new();
	for i in 0..values.len() {
		out.push_str(expect_string("concat", &values, i)?);
	}
	Ok(KelpExpr::String(out))
}

// nil past either end, and for an index that isn't finite
fn char_at(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "char", args, scope, Arity::exactly(2))?;
	let text = expect_string("char", &values, 0)?;
	let index = expect_number_kind("char", &values, 1, NumberKind::Integer)?.value;
	if !index.is_finite() || index < 0.0 {
		return Ok(KelpExpr::nil())
	}
	Ok(text.chars()
		.nth(index as usize)
		.map_or_else(KelpExpr::nil, |c| KelpExpr::String(c.to_string())))
}

fn upcase(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "upcase", args, scope, Arity::exactly(1))?;
	Ok(KelpExpr::String(expect_string("upcase", &values, 0)?.to_uppercase()))
}

fn downcase(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "downcase", args, scope, Arity::exactly(1))?;
	Ok(KelpExpr::String(expect_string("downcase", &values, 0)?.to_lowercase()))
}
