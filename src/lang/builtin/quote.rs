use crate::lang::error::{Arity, KelpError, KelpResult};
use crate::lang::eval::Interpreter;
use crate::lang::expr::KelpExpr;
use crate::lang::scope::KelpScope;

use super::{expect_arg_count, Builtin, KelpPlugin, PluginInfo};

pub struct QuotePlugin;

impl KelpPlugin for QuotePlugin {
	fn info(&self) -> PluginInfo {
		PluginInfo { name: "quote", desc: "quoting and templates" }
	}
	fn index(&self) -> Vec<(&'static str, Builtin)> {
		builtins![
			"quote"      => quote,
			"quasiquote" => quasiquote,
			"unquote"    => unquote,
		]
	}
}

fn quote(_: &Interpreter, args: &[KelpExpr], _: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("quote", args, Arity::exactly(1))?;
	Ok(args[0].clone())
}

fn quasiquote(ip: &Interpreter, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
	expect_arg_count("quasiquote", args, Arity::exactly(1))?;
	let expanded = expand_quasiquote(&args[0])?;
	log::trace!("quasiquote expanded to {}", expanded);
	ip.eval(&expanded, scope)
}

// only meaningful inside a quasiquote template, where expansion removes it
fn unquote(_: &Interpreter, _: &[KelpExpr], _: &KelpScope) -> KelpResult<KelpExpr> {
	Err(KelpError::IllegalUse { name: "unquote".to_string() })
}

fn form(name: &str, args: Vec<KelpExpr>) -> KelpExpr {
	let mut list = Vec::with_capacity(args.len() + 1);
	list.push(KelpExpr::symbol(name));
	list.extend(args);
	KelpExpr::List(list)
}

/// rewrite a template into `cons`/`quote` calls
///
/// atoms and `()` are quoted, `(unquote x)` becomes `x`, and any other list
/// becomes `(cons <head> <rest>)` with both sides expanded in turn.
pub fn expand_quasiquote(template: &KelpExpr) -> KelpResult<KelpExpr> {
	let list = match template {
		KelpExpr::List(list) if !list.is_empty() => list,
		atom => return Ok(form("quote", vec![atom.clone()])),
	};
	if list[0].as_symbol() == Some("unquote") {
		expect_arg_count("unquote", &list[1..], Arity::exactly(1))?;
		return Ok(list[1].clone())
	}
	let head = expand_quasiquote(&list[0])?;
	let tail = expand_quasiquote(&KelpExpr::List(list[1..].to_vec()))?;
	Ok(form("cons", vec![head, tail]))
}
