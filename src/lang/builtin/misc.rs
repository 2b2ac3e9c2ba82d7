//! special forms and list procedures

use std::rc::Rc;

use crate::lang::error::{Arity, KelpResult};
use crate::lang::eval::Interpreter;
use crate::lang::expr::{KelpExpr, KelpLambda, KelpMacro, KelpNumber, KelpType};
use crate::lang::scope::KelpScope;

use super::{expect_arg_count, expect_list, expect_symbol, expect_type, type_error, Builtin, KelpPlugin, PluginInfo};

pub struct MiscPlugin;

impl KelpPlugin for MiscPlugin {
	fn info(&self) -> PluginInfo {
		PluginInfo { name: "misc", desc: "binding, control flow and lists" }
	}
	fn index(&self) -> Vec<(&'static str, Builtin)> {
		builtins![
			"define" => define,
			"set!"   => set,
			"call"   => call,
			"lambda" => lambda,
			"macro"  => macro_,
			"list"   => list,
			"begin"  => begin,
			"equal"  => equal,
			"exists" => exists,
			"null"   => null,
			"atom"   => atom,
			"join"   => join,
			"cons"   => cons,
			"car"    => car,
			"cdr"    => cdr,
			"if"     => if_,
			"count"  => count,
		]
	}
}

/// check the count, then evaluate every argument in order
fn eval_args(ip: &Interpreter, context: &str, args: &[KelpExpr], scope: &KelpScope, arity: Arity) -> KelpResult<Vec<KelpExpr>> {
	expect_arg_count(context, args, arity)?;
	ip.eval_all(args, scope)
}

fn define(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("define", args, Arity::exactly(2))?;
	let name = expect_symbol("define", args, 0)?;
	let value = ip.eval(&args[1], scope)?;
	scope.define(name, value);
	Ok(args[0].clone())
}

fn set(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("set!", args, Arity::exactly(2))?;
	let name = expect_symbol("set!", args, 0)?;
	let value = ip.eval(&args[1], scope)?;
	scope.set(name, value)?;
	Ok(args[0].clone())
}

// `(call head args…)` with a computed head
fn call(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("call", args, Arity::at_least(1))?;
	let head = ip.eval(&args[0], scope)?;
	match &head {
		KelpExpr::Symbol(name) => ip.apply(name, &args[1..], scope),
		KelpExpr::Lambda(_) | KelpExpr::Macro(_) => ip.invoke("call", &head, &args[1..], scope),
		other => Err(type_error("call", 0, other, &[KelpType::Symbol, KelpType::Lambda, KelpType::Macro])),
	}
}

fn parameters(context: &str, args: &[KelpExpr]) -> KelpResult<Vec<String>> {
	let params = expect_list(context, args, 0)?;
	(0..params.len())
		.map(|i| expect_symbol(context, params, i).map(str::to_string))
		.collect()
}

fn lambda(_: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("lambda", args, Arity::exactly(2))?;
	Ok(KelpExpr::Lambda(Rc::new(KelpLambda {
		params: parameters("lambda::parameters", args)?,
		body: args[1].clone(),
		scope: scope.clone(),
	})))
}

fn macro_(_: &Interpreter, args: &[KelpExpr], _: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("macro", args, Arity::exactly(2))?;
	Ok(KelpExpr::Macro(Rc::new(KelpMacro {
		params: parameters("macro::parameters", args)?,
		body: args[1].clone(),
	})))
}

fn list(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	Ok(KelpExpr::List(ip.eval_all(args, scope)?))
}

fn begin(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let mut last = KelpExpr::nil();
	for arg in args {
		last = ip.eval(arg, scope)?;
	}
	Ok(last)
}

fn equal(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "equal", args, scope, Arity::at_least(2))?;
	Ok(KelpExpr::from_bool(values[1..].iter().all(|v| *v == values[0])))
}

// the name itself is never evaluated
fn exists(_: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("exists", args, Arity::exactly(1))?;
	let name = expect_symbol("exists", args, 0)?;
	Ok(KelpExpr::from_bool(scope.exists(name)))
}

fn null(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "null", args, scope, Arity::exactly(1))?;
	Ok(KelpExpr::from_bool(values[0].is_nil()))
}

fn atom(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "atom", args, scope, Arity::exactly(1))?;
	Ok(KelpExpr::from_bool(values[0].is_atom()))
}

fn join(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "join", args, scope, Arity::at_least(2))?;
	let mut out = vec![];
	for i in 0..values.len() {
		out.extend_from_slice(expect_list("join", &values, i)?);
	}
	Ok(KelpExpr::List(out))
}

fn cons(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let mut values = eval_args(ip, "cons", args, scope, Arity::exactly(2))?;
	let tail = values.pop().unwrap_or_else(KelpExpr::nil);
	let head = values.pop().unwrap_or_else(KelpExpr::nil);
	Ok(KelpExpr::List(match tail {
		KelpExpr::List(mut rest) => {
			rest.insert(0, head);
			rest
		},
		// an improper tail becomes the second element
		other => vec![head, other],
	}))
}

fn car(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "car", args, scope, Arity::exactly(1))?;
	let list = expect_list("car", &values, 0)?;
	Ok(list.first().cloned().unwrap_or_else(KelpExpr::nil))
}

fn cdr(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "cdr", args, scope, Arity::exactly(1))?;
	let list = expect_list("cdr", &values, 0)?;
	Ok(KelpExpr::List(list.iter().skip(1).cloned().collect()))
}

fn if_(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("if", args, Arity::between(2, 3))?;
	if !ip.eval(&args[0], scope)?.is_nil() {
		ip.eval(&args[1], scope)
	} else if let Some(otherwise) = args.get(2) {
		ip.eval(otherwise, scope)
	} else {
		Ok(KelpExpr::nil())
	}
}

fn count(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	let values = eval_args(ip, "count", args, scope, Arity::exactly(1))?;
	let len = match expect_type("count", &values, 0, &[KelpType::List, KelpType::String])? {
		KelpExpr::List(v) => v.len(),
		KelpExpr::String(v) => v.chars().count(),
		_ => 0,
	};
	Ok(KelpNumber::int(len as f64).into())
}
