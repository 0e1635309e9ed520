use std::fmt;
use std::path::{Path, PathBuf};

use services::RandomSource;

use crate::cli::{Cli, QuizArgs};

/// Questions per quiz when neither `--count` nor `VOCAB_QUIZ_COUNT` is given.
pub const DEFAULT_QUIZ_COUNT: usize = 10;

#[derive(Debug)]
pub enum ConfigError {
    InvalidDbUrl { raw: String },
    InvalidCount { value: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw:?}"),
            ConfigError::InvalidCount { value } => {
                write!(f, "--count must be at least 1, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: String,
    pub log_filter: String,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDbUrl` for a blank database location.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.db.trim().is_empty() {
            return Err(ConfigError::InvalidDbUrl {
                raw: cli.db.clone(),
            });
        }
        Ok(Self {
            db_url: normalize_sqlite_url(&cli.db),
            log_filter: cli.log.clone(),
        })
    }
}

/// Settings for the `quiz` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub count: usize,
    pub fresh: bool,
    pub random: RandomSource,
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCount` when the count is zero.
    pub fn from_args(args: &QuizArgs) -> Result<Self, ConfigError> {
        let count = args.count.unwrap_or(DEFAULT_QUIZ_COUNT);
        if count == 0 {
            return Err(ConfigError::InvalidCount { value: count });
        }
        Ok(Self {
            count,
            fresh: args.fresh,
            random: args.seed.map_or(RandomSource::Thread, RandomSource::seeded),
        })
    }
}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist before connecting.
///
/// # Errors
///
/// Returns an error for a malformed URL or if the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ConfigError::InvalidDbUrl {
            raw: db_url.to_owned(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: db_url.to_owned(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
