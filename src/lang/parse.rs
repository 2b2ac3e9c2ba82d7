use super::error::{KelpError, KelpResult};
use super::expr::{KelpExpr, KelpNumber};
use super::lex::{tokenize, KelpToken, KelpTokenValue};

/// every top-level form in the token stream, in order
pub fn parse(tokens: &[KelpToken]) -> KelpResult<Vec<KelpExpr>> {
	let mut out = vec![];
	let mut rest = tokens;
	while !rest.is_empty() {
		let (expr, new_rest) = parse_expr(rest)?;
		out.push(expr);
		rest = new_rest;
	}
	Ok(out)
}

/// tokenize then parse
pub fn read(text: &str) -> KelpResult<Vec<KelpExpr>> {
	parse(&tokenize(text))
}

fn parse_expr(tokens: &[KelpToken]) -> KelpResult<(KelpExpr, &[KelpToken])> {
	let (token, rest) = tokens.split_first().ok_or(KelpError::UnexpectedEof)?;
	match &token.0 {
		KelpTokenValue::Paren(true) => read_seq(rest),
		KelpTokenValue::Paren(false) => Err(KelpError::UnexpectedToken {
			got: token.0.clone(),
			position: token.1,
		}),
		KelpTokenValue::Modifier(m) => {
			// 'x -> (quote x), `x -> (quasiquote x), ,x -> (unquote x)
			let (inner, rest) = parse_expr(rest)?;
			Ok((KelpExpr::List(vec![KelpExpr::symbol(m.form_name()), inner]), rest))
		},
		KelpTokenValue::Symbol(name) => Ok((KelpExpr::Symbol(name.clone()), rest)),
		KelpTokenValue::String(data) => Ok((KelpExpr::String(data.clone()), rest)),
		KelpTokenValue::Integer(v) => Ok((KelpNumber::int(*v as f64).into(), rest)),
		KelpTokenValue::Float(v) => Ok((KelpNumber::float(*v).into(), rest)),
	}
}

fn read_seq(tokens: &[KelpToken]) -> KelpResult<(KelpExpr, &[KelpToken])> {
	let mut res = vec![];
	let mut xs = tokens;
	loop {
		let (token, rest) = xs.split_first().ok_or(KelpError::UnexpectedEof)?;
		if token.0 == KelpTokenValue::Paren(false) {
			return Ok((KelpExpr::List(res), rest))
		}
		let (expr, new_xs) = parse_expr(xs)?;
		res.push(expr);
		xs = new_xs;
	}
}
