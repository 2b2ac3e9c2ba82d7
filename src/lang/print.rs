//! where `print` output goes
//!
//! - `Stdout`: the terminal (default)
//! - `Buffer`: captured for embedders and tests

use std::cell::RefCell;

#[derive(Debug, Default)]
pub enum PrintHandler {
	#[default]
	Stdout,
	Buffer(RefCell<String>),
}

impl PrintHandler {
	pub fn buffer() -> Self {
		PrintHandler::Buffer(RefCell::new(String::new()))
	}
	/// write one line
	pub fn println(&self, msg: &str) {
		match self {
			PrintHandler::Stdout => println!("{}", msg),
			PrintHandler::Buffer(buf) => {
				let mut buf = buf.borrow_mut();
				buf.push_str(msg);
				buf.push('\n');
			},
		}
	}
	/// captured output, always empty for stdout
	pub fn get_output(&self) -> String {
		match self {
			PrintHandler::Stdout => String::new(),
			PrintHandler::Buffer(buf) => buf.borrow().clone(),
		}
	}
	pub fn clear(&self) {
		if let PrintHandler::Buffer(buf) = self {
			buf.borrow_mut().clear();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn buffer_captures_lines() {
		let handler = PrintHandler::buffer();
		handler.println("one");
		handler.println("two");
		assert_eq!(handler.get_output(), "one\ntwo\n");
		handler.clear();
		assert_eq!(handler.get_output(), "");
	}

	#[test]
	fn stdout_captures_nothing() {
		let handler = PrintHandler::default();
		assert_eq!(handler.get_output(), "");
	}
}
