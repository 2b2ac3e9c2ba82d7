use std::fmt;

/// 1-based line and column of a token's first character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
	pub line: usize,
	pub column: usize,
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// reader shorthands, each expanding into a two element list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
	Quote,
	Quasiquote,
	Unquote,
}

impl Modifier {
	/// name of the special form the shorthand expands into
	pub fn form_name(&self) -> &'static str {
		match self {
			Self::Quote      => "quote",
			Self::Quasiquote => "quasiquote",
			Self::Unquote    => "unquote",
		}
	}
	pub fn as_char(&self) -> char {
		match self {
			Self::Quote      => '\'',
			Self::Quasiquote => '`',
			Self::Unquote    => ',',
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum KelpTokenValue {
	Paren(bool), // true: (  false: )
	Modifier(Modifier),
	Symbol(String),
	String(String),
	Integer(i64),
	Float(f64),
}

impl fmt::Display for KelpTokenValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Paren(open) => f.write_str(if *open {"("} else {")"}),
			Self::Modifier(m) => write!(f, "{}", m.as_char()),
			Self::Symbol(v)   => f.write_str(v),
			Self::String(v)   => write!(f, "\"{}\"", v),
			Self::Integer(v)  => write!(f, "{}", v),
			Self::Float(v)    => write!(f, "{:?}", v),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct KelpToken(pub KelpTokenValue, pub Position);

enum CharType {
	Whitespace,
	Paren(bool),
	Modifier(Modifier),
	StringQuote,
	Other,
}

fn char_type(c: char) -> CharType {
	match c {
		' '|'\t'|'\n' => CharType::Whitespace,
		'(' => CharType::Paren(true),
		')' => CharType::Paren(false),
		'\'' => CharType::Modifier(Modifier::Quote),
		'`' => CharType::Modifier(Modifier::Quasiquote),
		',' => CharType::Modifier(Modifier::Unquote),
		'"' => CharType::StringQuote,
		_ => CharType::Other,
	}
}

/// integer if it parses as one, else float if it parses as one, else symbol
fn classify(word: String) -> KelpTokenValue {
	if let Ok(v) = word.parse::<i64>() {
		KelpTokenValue::Integer(v)
	} else if let Ok(v) = word.parse::<f64>() {
		KelpTokenValue::Float(v)
	} else {
		KelpTokenValue::Symbol(word)
	}
}

/// split source text into tokens; never fails, an unterminated string runs to the end of input
pub fn tokenize(data: &str) -> Vec<KelpToken> {
	let mut line = 1;
	let mut column = 1;
	let mut iter = data.chars().map(|ch| {
		let pos = Position { line, column };
		match ch {
			'\n' => { line += 1; column = 1; },
			_ => { column += 1; },
		}
		(pos, ch)
	}).peekable();
	let mut out = vec![];
	while let Some((pos, ch)) = iter.next() {
		match char_type(ch) {
			CharType::Whitespace => {},
			CharType::Paren(open) => out.push(KelpToken(KelpTokenValue::Paren(open), pos)),
			CharType::Modifier(m) => out.push(KelpToken(KelpTokenValue::Modifier(m), pos)),
			CharType::StringQuote => {
				// read verbatim, only a backslash before `"` keeps the string open
				let mut res = String::new();
				let mut last = None;
				let mut closed = false;
				for (_, ch) in iter.by_ref() {
					if ch == '"' && last != Some('\\') {
						closed = true;
						break
					}
					res.push(ch);
					last = Some(ch);
				}
				if !closed {
					log::warn!("string starting at {} is never closed", pos);
				}
				out.push(KelpToken(KelpTokenValue::String(res), pos));
			},
			CharType::Other => {
				// a `"` inside a word doesn't start a string
				let mut res = String::from(ch);
				while let Some((_, ch)) = iter.next_if(|(_, c)| matches!(char_type(*c), CharType::Other | CharType::StringQuote)) {
					res.push(ch);
				}
				if res.contains('\r') {
					log::warn!("word at {} contains a carriage return, is the source CRLF?", pos);
				}
				out.push(KelpToken(classify(res), pos));
			},
		}
	}
	log::trace!("tokenized {} token(s)", out.len());
	out
}
