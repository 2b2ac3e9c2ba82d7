use std::fmt;

use thiserror::Error;

use crate::utils::{format_arg_range, format_list};

use super::expr::{KelpType, NumberKind};
use super::lex::{KelpTokenValue, Position};

/// inclusive argument count range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
	pub min: usize,
	pub max: Option<usize>,
}

impl Arity {
	pub const fn exactly(n: usize) -> Self {
		Self { min: n, max: Some(n) }
	}
	pub const fn at_least(n: usize) -> Self {
		Self { min: n, max: None }
	}
	pub const fn between(min: usize, max: usize) -> Self {
		Self { min, max: Some(max) }
	}
	pub fn contains(&self, n: usize) -> bool {
		n >= self.min && self.max.map_or(true, |max| n <= max)
	}
}

impl fmt::Display for Arity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&format_arg_range(self.min, self.max))
	}
}

fn format_types(types: &[KelpType]) -> String {
	format_list(&types.iter().map(|v| v.to_string()).collect::<Vec<_>>(), false)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KelpError {
	#[error("`{name}` isn't defined")]
	UndefinedVariable { name: String },
	#[error("{context}: argument {index} is a {got}, expected {}", format_types(.expected))]
	InvalidType { context: String, index: usize, got: KelpType, expected: Vec<KelpType> },
	#[error("{context}: argument {index} is a {got} number, expected {expected}")]
	InvalidNumberKind { context: String, index: usize, got: NumberKind, expected: NumberKind },
	#[error("{context}: expected {expected}, got {got}")]
	ArityError { context: String, got: usize, expected: Arity },
	#[error("`{name}` isn't callable")]
	NotCallable { name: String },
	#[error("`{name}` can't be used here")]
	IllegalUse { name: String },
	#[error("unexpected `{got}` at {position}")]
	UnexpectedToken { got: KelpTokenValue, position: Position },
	#[error("unexpected end of input")]
	UnexpectedEof,
}

pub type KelpResult<T> = Result<T, KelpError>;
