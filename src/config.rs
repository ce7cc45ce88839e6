use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_SECTION_SIZE: usize = 20;
const DEFAULT_PRACTICE_SIZE: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive whole number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Settings read from the environment after `.env` is loaded.
/// `TELOXIDE_TOKEN` is read by teloxide itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Replaces the built-in verb list when set.
    pub verbs_file: Option<PathBuf>,
    pub section_size: usize,
    pub practice_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbs_file: None,
            section_size: DEFAULT_SECTION_SIZE,
            practice_size: DEFAULT_PRACTICE_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            verbs_file: lookup("VERBS_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            section_size: positive(&lookup, "SECTION_SIZE", defaults.section_size)?,
            practice_size: positive(&lookup, "PRACTICE_SIZE", defaults.practice_size)?,
        })
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: usize,
) -> Result<usize, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(default);
    };
    match value.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}
