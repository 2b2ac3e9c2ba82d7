use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use kelp::config::{Config, ConfigError};
use kelp::{Interpreter, KelpError, KelpExpr, KelpResult};
use log::{debug, info, LevelFilter};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

const CONTINUATION_PROMPT: &str = "... ";

#[derive(Debug, Error)]
enum CliError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("can't read {}: {source}", .path.display())]
	Io { path: PathBuf, source: std::io::Error },
	#[error("{}: {source}", .path.display())]
	Eval { path: PathBuf, source: KelpError },
	#[error("prelude: {0}")]
	Prelude(KelpError),
	#[error("line editor: {0}")]
	Readline(#[from] ReadlineError),
}

fn init_logger(level: LevelFilter) {
	env_logger::Builder::new()
		.filter_level(LevelFilter::Warn)
		.filter_module("kelp", level)
		.init();
}

fn run_file(ip: &Interpreter, path: &Path) -> Result<(), CliError> {
	let text = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
	let results = ip.run_source(&text).map_err(|source| CliError::Eval { path: path.to_path_buf(), source })?;
	debug!("{}: ran {} form(s)", path.display(), results.len());
	Ok(())
}

fn load_prelude(ip: &Interpreter, config: &Config) -> Result<(), CliError> {
	if !config.load_prelude {
		info!("prelude disabled");
		return Ok(())
	}
	match &config.prelude {
		Some(path) => run_file(ip, path),
		None => ip.load_prelude().map_err(CliError::Prelude),
	}
}

fn builtin_listing(ip: &Interpreter) -> String {
	ip.builtins().names().join(" ")
}

/// parse the pending input; `None` while a form is still open
fn read_pending(pending: &str) -> Option<KelpResult<Vec<KelpExpr>>> {
	match kelp::read(pending) {
		Err(KelpError::UnexpectedEof) => None,
		other => Some(other),
	}
}

fn repl(ip: &Interpreter, config: &Config) -> Result<(), CliError> {
	let mut rl = DefaultEditor::new()?;
	if let Some(history) = &config.history {
		if let Err(err) = rl.load_history(history) {
			debug!("no history loaded from {}: {}", history.display(), err);
		}
	}
	let mut pending = String::new();
	loop {
		let prompt = if pending.is_empty() { config.prompt.as_str() } else { CONTINUATION_PROMPT };
		match rl.readline(prompt) {
			Ok(line) => {
				if pending.is_empty() {
					match line.trim() {
						":quit" | ":exit" => break,
						":builtins" => {
							println!("{}", builtin_listing(ip));
							continue
						},
						_ => {},
					}
				}
				if !pending.is_empty() {
					pending.push('\n');
				}
				pending.push_str(&line);
				if pending.trim().is_empty() {
					pending.clear();
					continue
				}
				let Some(forms) = read_pending(&pending) else { continue };
				rl.add_history_entry(pending.as_str())?;
				pending.clear();
				let forms = match forms {
					Ok(forms) => forms,
					Err(err) => {
						debug!("parse failed: {:?}", err);
						eprintln!("error: {}", err);
						continue
					},
				};
				for form in &forms {
					match ip.run(form) {
						Ok(value) => println!("{}", value),
						Err(err) => {
							debug!("{} failed: {:?}", form, err);
							eprintln!("error: {}", err);
							break
						},
					}
				}
			},
			Err(ReadlineError::Interrupted) => pending.clear(),
			Err(ReadlineError::Eof) => break,
			Err(err) => return Err(err.into()),
		}
	}
	if let Some(history) = &config.history {
		rl.save_history(history)?;
	}
	Ok(())
}

fn run() -> Result<(), CliError> {
	let config = Config::discover();
	init_logger(config.as_ref().ok().and_then(|c| c.log_level().ok()).unwrap_or(LevelFilter::Warn));
	let config = config?;
	let ip = Interpreter::new();
	load_prelude(&ip, &config)?;
	let files: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
	if files.is_empty() {
		return repl(&ip, &config)
	}
	for path in &files {
		run_file(&ip, path)?;
	}
	Ok(())
}

fn main() -> ExitCode {
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("error: {}", err);
			ExitCode::FAILURE
		},
	}
}
