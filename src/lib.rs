//! kelp, a small lisp
//!
//! ```
//! let ip = kelp::Interpreter::new();
//! let out = ip.run_source("(define sq (lambda (x) (* x x))) (sq 7)").unwrap();
//! assert_eq!(out[1].to_string(), "49");
//! ```

pub mod config;
pub mod lang;
mod utils;

pub use lang::{read, tokenize, Interpreter, KelpError, KelpExpr, KelpResult, KelpScope, PrintHandler};

/// the standard library, run by `Interpreter::load_prelude`
pub const PRELUDE: &str = include_str!("../lib/prelude.kelp");
