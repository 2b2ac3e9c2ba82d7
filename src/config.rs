//! `kelp.toml`, all fields optional
//!
//! ```toml
//! prelude = "lib/extra.kelp"  # replaces the built-in prelude
//! load_prelude = true
//! prompt = "kelp> "
//! log_level = "warn"
//! history = ".kelp_history"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "KELP_CONFIG";
pub const CONFIG_FILE: &str = "kelp.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("can't read {}: {source}", .path.display())]
	Io { path: PathBuf, source: io::Error },
	#[error("bad config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("unknown log level `{0}`")]
	InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub prelude: Option<PathBuf>,
	pub load_prelude: bool,
	pub prompt: String,
	pub log_level: String,
	pub history: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			prelude: None,
			load_prelude: true,
			prompt: "kelp> ".to_string(),
			log_level: "warn".to_string(),
			history: None,
		}
	}
}

impl FromStr for Config {
	type Err = ConfigError;
	fn from_str(text: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(text)?;
		config.log_level()?;
		Ok(config)
	}
}

impl Config {
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
		text.parse()
	}

	/// `$KELP_CONFIG` if set, else `./kelp.toml` if present, else defaults
	pub fn discover() -> Result<Self, ConfigError> {
		if let Some(path) = std::env::var_os(CONFIG_ENV) {
			return Self::load(Path::new(&path))
		}
		let local = Path::new(CONFIG_FILE);
		if local.is_file() {
			Self::load(local)
		} else {
			Ok(Self::default())
		}
	}

	pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
		LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
	}
}
