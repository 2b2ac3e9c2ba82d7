use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::error::{KelpError, KelpResult};
use super::expr::KelpExpr;

struct ScopeData {
	data: HashMap<String, KelpExpr>,
	parent: Option<KelpScope>,
}

/// shared handle to a lexical environment; clones point at the same bindings
#[derive(Clone)]
pub struct KelpScope(Rc<RefCell<ScopeData>>);

impl KelpScope {
	pub fn root() -> Self {
		Self::with_bindings(&[], vec![], None)
	}
	pub fn child(parent: &KelpScope) -> Self {
		Self::with_bindings(&[], vec![], Some(parent))
	}
	/// seeded with `zip(params, args)`, surplus on either side is dropped
	pub fn with_bindings(params: &[String], args: Vec<KelpExpr>, parent: Option<&KelpScope>) -> Self {
		let data = params.iter().cloned().zip(args).collect();
		Self(Rc::new(RefCell::new(ScopeData { data, parent: parent.cloned() })))
	}
	pub fn parent(&self) -> Option<KelpScope> {
		self.0.borrow().parent.clone()
	}
	/// bind in this scope only, shadowing or overwriting
	pub fn define(&self, name: impl Into<String>, value: KelpExpr) {
		self.0.borrow_mut().data.insert(name.into(), value);
	}
	pub fn get(&self, name: &str) -> KelpResult<KelpExpr> {
		let scope = self.find_scope(name).ok_or_else(|| undefined(name))?;
		let value = scope.0.borrow().data.get(name).cloned();
		value.ok_or_else(|| undefined(name))
	}
	/// rebind in the nearest scope that already owns `name`
	pub fn set(&self, name: &str, value: KelpExpr) -> KelpResult<()> {
		let scope = self.find_scope(name).ok_or_else(|| undefined(name))?;
		scope.define(name, value);
		Ok(())
	}
	pub fn exists(&self, name: &str) -> bool {
		self.find_scope(name).is_some()
	}
	/// both handles refer to the same scope
	pub fn same(&self, other: &KelpScope) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
	/// names bound directly in this scope, sorted
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<_> = self.0.borrow().data.keys().cloned().collect();
		names.sort();
		names
	}
	fn find_scope(&self, name: &str) -> Option<KelpScope> {
		let mut current = self.clone();
		loop {
			let parent = {
				let lock = current.0.borrow();
				if lock.data.contains_key(name) {
					return Some(current.clone())
				}
				lock.parent.clone()
			};
			current = parent?;
		}
	}
}

fn undefined(name: &str) -> KelpError {
	KelpError::UndefinedVariable { name: name.to_string() }
}

impl fmt::Debug for KelpScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KelpScope")
			.field("names", &self.names())
			.field("parent", &self.parent().is_some())
			.finish()
	}
}
