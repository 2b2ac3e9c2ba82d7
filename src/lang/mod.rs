#[macro_use]
pub mod builtin;
pub mod error;
pub mod eval;
pub mod expr;
pub mod lex;
pub mod parse;
pub mod print;
pub mod scope;

pub use builtin::{KelpPlugin, PluginInfo, Registry};
pub use error::{Arity, KelpError, KelpResult};
pub use eval::{Interpreter, InterpreterBuilder};
pub use expr::{KelpExpr, KelpNumber, KelpType, NumberKind};
pub use lex::{tokenize, KelpToken, KelpTokenValue, Position};
pub use parse::{parse, read};
pub use print::PrintHandler;
pub use scope::KelpScope;
