use std::fmt;
use std::ops;
use std::rc::Rc;

use super::scope::KelpScope;

pub const NIL_NAME: &str = "nil";
pub const TRUE_NAME: &str = "t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
	Integer,
	Float,
}

impl NumberKind {
	/// float as soon as any operand is a float
	pub fn infer(numbers: &[KelpNumber]) -> NumberKind {
		if numbers.iter().any(|n| n.kind == NumberKind::Float) {
			NumberKind::Float
		} else {
			NumberKind::Integer
		}
	}
}

impl fmt::Display for NumberKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			NumberKind::Integer => "integer",
			NumberKind::Float   => "float",
		})
	}
}

/// a number, always stored as f64; the kind only decides how results are tagged and printed
#[derive(Debug, Clone, Copy)]
pub struct KelpNumber {
	pub kind: NumberKind,
	pub value: f64,
}

impl KelpNumber {
	pub fn int(value: f64) -> Self {
		Self { kind: NumberKind::Integer, value }
	}
	pub fn float(value: f64) -> Self {
		Self { kind: NumberKind::Float, value }
	}
}

macro_rules! number_op {
	($trait:ident, $method:ident, $op:tt) => {
		impl ops::$trait for KelpNumber {
			type Output = KelpNumber;
			fn $method(self, rhs: KelpNumber) -> KelpNumber {
				KelpNumber {
					kind: NumberKind::infer(&[self, rhs]),
					value: self.value $op rhs.value,
				}
			}
		}
	};
}

number_op!(Add, add, +);
number_op!(Sub, sub, -);
number_op!(Mul, mul, *);
number_op!(Div, div, /);
// f64 `%` truncates, keeping the sign of the dividend
number_op!(Rem, rem, %);

// comparisons ignore the kind
impl PartialEq for KelpNumber {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl PartialOrd for KelpNumber {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		self.value.partial_cmp(&other.value)
	}
}

impl fmt::Display for KelpNumber {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.kind {
			// f64 display never uses an exponent; `+ 0.0` turns -0 into 0
			NumberKind::Integer if self.value.is_finite() => write!(f, "{}", self.value.trunc() + 0.0),
			_ => write!(f, "{:?}", self.value),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KelpType {
	Number, String, Symbol, List, Lambda, Macro,
}

impl fmt::Display for KelpType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			KelpType::Number => "number",
			KelpType::String => "string",
			KelpType::Symbol => "symbol",
			KelpType::List   => "list",
			KelpType::Lambda => "lambda",
			KelpType::Macro  => "macro",
		})
	}
}

/// a closure over the scope it was created in
pub struct KelpLambda {
	pub params: Vec<String>,
	pub body: KelpExpr,
	pub scope: KelpScope,
}

/// receives unevaluated syntax and runs in a scope with no parent
pub struct KelpMacro {
	pub params: Vec<String>,
	pub body: KelpExpr,
}

/// every value and every piece of syntax
#[derive(Clone)]
pub enum KelpExpr {
	Number(KelpNumber),
	String(String),
	Symbol(String),
	List(Vec<KelpExpr>),
	Lambda(Rc<KelpLambda>),
	Macro(Rc<KelpMacro>),
}

impl KelpExpr {
	/// the empty list, also spelled `nil`
	pub fn nil() -> Self {
		KelpExpr::List(vec![])
	}
	/// the truthy constant `t`
	pub fn truth() -> Self {
		KelpExpr::Symbol(TRUE_NAME.to_string())
	}
	/// every predicate answers with exactly one of the two constants
	pub fn from_bool(v: bool) -> Self {
		if v { Self::truth() } else { Self::nil() }
	}
	pub fn symbol(name: impl Into<String>) -> Self {
		KelpExpr::Symbol(name.into())
	}
	pub fn get_type(&self) -> KelpType {
		match self {
			KelpExpr::Number(_) => KelpType::Number,
			KelpExpr::String(_) => KelpType::String,
			KelpExpr::Symbol(_) => KelpType::Symbol,
			KelpExpr::List(_)   => KelpType::List,
			KelpExpr::Lambda(_) => KelpType::Lambda,
			KelpExpr::Macro(_)  => KelpType::Macro,
		}
	}
	pub fn as_symbol(&self) -> Option<&str> {
		match self {
			KelpExpr::Symbol(v) => Some(v),
			_ => None,
		}
	}
	/// anything but a non-empty list
	pub fn is_atom(&self) -> bool {
		match self {
			KelpExpr::List(v) => v.is_empty(),
			_ => true,
		}
	}
	pub fn is_nil(&self) -> bool {
		*self == Self::nil()
	}
}

// structural, with `nil` and `()` equal in both directions
impl PartialEq for KelpExpr {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(KelpExpr::Number(a), KelpExpr::Number(b)) => a == b,
			(KelpExpr::String(a), KelpExpr::String(b)) => a == b,
			(KelpExpr::Symbol(a), KelpExpr::Symbol(b)) => a == b,
			(KelpExpr::List(a), KelpExpr::List(b)) => a == b,
			(KelpExpr::Symbol(name), KelpExpr::List(list))
			| (KelpExpr::List(list), KelpExpr::Symbol(name)) => name == NIL_NAME && list.is_empty(),
			(KelpExpr::Lambda(a), KelpExpr::Lambda(b)) => {
				a.params == b.params && a.body == b.body && a.scope.same(&b.scope)
			},
			(KelpExpr::Macro(a), KelpExpr::Macro(b)) => a.params == b.params && a.body == b.body,
			_ => false,
		}
	}
}

impl fmt::Display for KelpExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			KelpExpr::Number(v) => write!(f, "{}", v),
			KelpExpr::String(v) => write!(f, "\"{}\"", v),
			KelpExpr::Symbol(v) => f.write_str(v),
			KelpExpr::List(v) if v.is_empty() => f.write_str(NIL_NAME),
			KelpExpr::List(v) => write!(f, "({})", v.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")),
			KelpExpr::Lambda(l) => write!(f, "(lambda ({}) {})", l.params.join(" "), l.body),
			KelpExpr::Macro(m) => write!(f, "(macro ({}) {})", m.params.join(" "), m.body),
		}
	}
}

// closures would drag their whole scope into the output
impl fmt::Debug for KelpExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			KelpExpr::Number(a) => f.debug_tuple("Number").field(&a.kind).field(&a.value).finish(),
			KelpExpr::String(a) => f.debug_tuple("String").field(a).finish(),
			KelpExpr::Symbol(a) => f.debug_tuple("Symbol").field(a).finish(),
			KelpExpr::List(a)   => f.debug_tuple("List").field(a).finish(),
			KelpExpr::Lambda(a) => f.debug_tuple("Lambda").field(&a.params).field(&a.body).finish(),
			KelpExpr::Macro(a)  => f.debug_tuple("Macro").field(&a.params).field(&a.body).finish(),
		}
	}
}

impl From<KelpNumber> for KelpExpr {
	fn from(v: KelpNumber) -> Self {
		KelpExpr::Number(v)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn int(v: f64) -> KelpExpr { KelpNumber::int(v).into() }
	fn float(v: f64) -> KelpExpr { KelpNumber::float(v).into() }

	#[test]
	fn nil_symbol_equals_empty_list() {
		assert_eq!(KelpExpr::symbol("nil"), KelpExpr::nil());
		assert_eq!(KelpExpr::nil(), KelpExpr::symbol("nil"));
		assert!(KelpExpr::symbol("nil").is_nil());
		assert_ne!(KelpExpr::symbol("t"), KelpExpr::nil());
		// nested too
		assert_eq!(
			KelpExpr::List(vec![int(1.0), KelpExpr::symbol("nil")]),
			KelpExpr::List(vec![int(1.0), KelpExpr::nil()]),
		);
	}

	#[test]
	fn numbers_compare_by_value() {
		assert_eq!(int(3.0), float(3.0));
		assert_ne!(int(3.0), KelpExpr::String("3".into()));
	}

	#[test]
	fn kind_inference() {
		let sum = KelpNumber::int(1.0) + KelpNumber::int(2.0);
		assert_eq!(sum.kind, NumberKind::Integer);
		let sum = KelpNumber::int(1.0) + KelpNumber::float(2.0);
		assert_eq!(sum.kind, NumberKind::Float);
		let rem = KelpNumber::int(-7.0) % KelpNumber::int(3.0);
		assert_eq!(rem.value, -1.0);
	}

	#[test]
	fn descriptions() {
		assert_eq!(int(3.0).to_string(), "3");
		assert_eq!(int(3.5).to_string(), "3");
		assert_eq!(int(-0.5).to_string(), "0");
		assert_eq!(int(1e20).to_string(), "100000000000000000000");
		assert_eq!(int(-1e20).to_string(), "-100000000000000000000");
		assert_eq!(float(3.0).to_string(), "3.0");
		assert_eq!(float(0.25).to_string(), "0.25");
		assert_eq!(KelpExpr::String("hi there".into()).to_string(), "\"hi there\"");
		assert_eq!(KelpExpr::nil().to_string(), "nil");
		let list = KelpExpr::List(vec![KelpExpr::symbol("a"), int(5.0), KelpExpr::List(vec![])]);
		assert_eq!(list.to_string(), "(a 5 nil)");
		let mac = KelpExpr::Macro(Rc::new(KelpMacro {
			params: vec!["x".into(), "y".into()],
			body: KelpExpr::symbol("x"),
		}));
		assert_eq!(mac.to_string(), "(macro (x y) x)");
	}

	#[test]
	fn atoms() {
		assert!(int(1.0).is_atom());
		assert!(KelpExpr::nil().is_atom());
		assert!(!KelpExpr::List(vec![int(1.0)]).is_atom());
	}
}
