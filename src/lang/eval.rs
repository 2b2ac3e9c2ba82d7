use super::builtin::{default_plugins, type_error, Builtin, KelpPlugin, Registry};
use super::error::{KelpError, KelpResult};
use super::expr::{KelpExpr, KelpLambda, KelpMacro, KelpType, NIL_NAME, TRUE_NAME};
use super::parse::read;
use super::print::PrintHandler;
use super::scope::KelpScope;

/// collects builtin tables before any evaluation happens
#[derive(Default)]
pub struct InterpreterBuilder {
	registry: Registry,
	printer: PrintHandler,
}

impl InterpreterBuilder {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn plugin(mut self, plugin: &dyn KelpPlugin) -> Self {
		let info = plugin.info();
		let table = plugin.index();
		log::debug!("registering plugin `{}` ({}), {} builtin(s)", info.name, info.desc, table.len());
		self.table(table)
	}
	/// later names replace earlier ones
	pub fn table(mut self, table: impl IntoIterator<Item = (&'static str, Builtin)>) -> Self {
		self.registry.merge(table);
		self
	}
	pub fn default_plugins(self) -> Self {
		default_plugins().iter().fold(self, |builder, plugin| builder.plugin(plugin.as_ref()))
	}
	pub fn print_handler(mut self, printer: PrintHandler) -> Self {
		self.printer = printer;
		self
	}
	pub fn build(self) -> Interpreter {
		let global = KelpScope::root();
		global.define(NIL_NAME, KelpExpr::nil());
		global.define(TRUE_NAME, KelpExpr::truth());
		if self.registry.is_empty() {
			log::warn!("interpreter built without any builtins");
		} else {
			log::info!("interpreter ready with {} builtin(s)", self.registry.len());
		}
		Interpreter { global, builtins: self.registry, printer: self.printer }
	}
}

pub struct Interpreter {
	global: KelpScope,
	builtins: Registry,
	printer: PrintHandler,
}

impl Default for Interpreter {
	fn default() -> Self {
		Self::new()
	}
}

impl Interpreter {
	/// every default plugin, printing to stdout
	pub fn new() -> Self {
		Self::builder().default_plugins().build()
	}
	pub fn builder() -> InterpreterBuilder {
		InterpreterBuilder::new()
	}
	pub fn global(&self) -> &KelpScope {
		&self.global
	}
	pub fn builtins(&self) -> &Registry {
		&self.builtins
	}
	pub fn printer(&self) -> &PrintHandler {
		&self.printer
	}
	/// captured `print` output when built with a buffer
	pub fn output(&self) -> String {
		self.printer.get_output()
	}

	/// evaluate one top-level form in the global scope
	pub fn run(&self, expr: &KelpExpr) -> KelpResult<KelpExpr> {
		self.eval(expr, &self.global)
	}

	/// run every form of a source unit in order, stopping at the first error
	pub fn run_source(&self, text: &str) -> KelpResult<Vec<KelpExpr>> {
		read(text)?.iter().map(|form| self.run(form)).collect()
	}

	pub fn load_prelude(&self) -> KelpResult<()> {
		let defined = self.run_source(crate::PRELUDE)?;
		log::info!("prelude loaded, {} form(s)", defined.len());
		Ok(())
	}

	pub fn eval(&self, expr: &KelpExpr, scope: &KelpScope) -> KelpResult<KelpExpr> {
		log::trace!("eval {}", expr);
		match expr {
			KelpExpr::Symbol(name) => scope.get(name),
			KelpExpr::List(list) => match list.split_first() {
				// the empty list is nil
				None => Ok(expr.clone()),
				Some((KelpExpr::Symbol(name), args)) => self.apply(name, args, scope),
				Some((head, _)) => Err(type_error("eval", 0, head, &[KelpType::Symbol])),
			},
			// numbers, strings and closures evaluate to themselves
			KelpExpr::Number(_)
			| KelpExpr::String(_)
			| KelpExpr::Lambda(_)
			| KelpExpr::Macro(_) => Ok(expr.clone()),
		}
	}

	/// evaluate left to right
	pub fn eval_all(&self, exprs: &[KelpExpr], scope: &KelpScope) -> KelpResult<Vec<KelpExpr>> {
		exprs.iter().map(|x| self.eval(x, scope)).collect()
	}

	/// `(name args…)`: a builtin first, otherwise whatever `name` is bound to
	pub fn apply(&self, name: &str, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
		if let Some(builtin) = self.builtins.get(name) {
			return builtin(self, args, scope)
		}
		let callee = scope.get(name)?;
		self.invoke(name, &callee, args, scope)
	}

	/// call a closure value with unevaluated `args` written in `scope`
	pub fn invoke(&self, name: &str, callee: &KelpExpr, args: &[KelpExpr], scope: &KelpScope) -> KelpResult<KelpExpr> {
		match callee {
			KelpExpr::Lambda(lambda) => {
				let values = self.eval_all(args, scope)?;
				self.call_lambda(lambda, values)
			},
			KelpExpr::Macro(mac) => {
				let expansion = self.expand_macro(mac, args)?;
				log::debug!("{} expanded to {}", name, expansion);
				self.eval(&expansion, scope)
			},
			_ => Err(KelpError::NotCallable { name: name.to_string() }),
		}
	}

	/// evaluate the body in a fresh child of the captured scope
	pub fn call_lambda(&self, lambda: &KelpLambda, args: Vec<KelpExpr>) -> KelpResult<KelpExpr> {
		log::debug!("call (lambda ({})) with {} argument(s)", lambda.params.join(" "), args.len());
		let scope = KelpScope::with_bindings(&lambda.params, args, Some(&lambda.scope));
		self.eval(&lambda.body, &scope)
	}

	/// replacement syntax, built in a scope with no parent
	pub fn expand_macro(&self, mac: &KelpMacro, args: &[KelpExpr]) -> KelpResult<KelpExpr> {
		let scope = KelpScope::with_bindings(&mac.params, args.to_vec(), None);
		self.eval(&mac.body, &scope)
	}
}
