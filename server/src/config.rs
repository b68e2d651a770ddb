use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{anyhow, ensure};
use tracing::{info, warn};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub dist_dir: PathBuf,
    pub words_per_request: usize,
    pub copies: usize,
    pub words_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "3000")?,
            dist_dir: try_load(&lookup, "DIST_DIR", "web/dist")?,
            words_per_request: try_load(&lookup, "WORDS_PER_REQUEST", "60")?,
            copies: try_load(&lookup, "WORD_COPIES", "5")?,
            words_file: lookup("WORDS_FILE").map(PathBuf::from),
        };
        ensure!(config.words_per_request > 0, "WORDS_PER_REQUEST must be positive");
        ensure!(config.copies > 0, "WORD_COPIES must be positive");
        Ok(config)
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("invalid {key} value {raw:?}: {e}")
    })
}
