use std::{
    fs, io,
    num::NonZeroUsize,
    path::Path,
};

use anyhow::{Context, Result};
use home::home_dir;
use serde::Deserialize;
use sumcheck_digest::{Algorithm, DigestConfig};

use crate::cli::GlobalOpts;

const DEFAULT_CONFIG_FILE: &str = ".sumcheck.toml";

/// Settings read from a TOML config file. Unset keys keep the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    algorithm:  Option<Algorithm>,
    chunk_size: Option<NonZeroUsize>,
}

impl FileConfig {
    fn apply(self, mut config: DigestConfig) -> DigestConfig {
        if let Some(algorithm) = self.algorithm {
            config = config.algorithm(algorithm);
        }
        if let Some(chunk_size) = self.chunk_size {
            config = config.chunk_size(chunk_size);
        }
        config
    }
}

/// Resolve the digest configuration: defaults, then the config file, then
/// environment variables and flags (clap merges those two).
pub fn resolve(opts: &GlobalOpts) -> Result<DigestConfig> {
    let mut config = DigestConfig::new();

    let file = match &opts.config {
        Some(path) => load_file(path, true)?,
        None => match home_dir() {
            Some(home) => load_file(&home.join(DEFAULT_CONFIG_FILE), false)?,
            None => None,
        },
    };
    if let Some(file) = file {
        config = file.apply(config);
    }

    if let Some(algorithm) = opts.algorithm {
        config = config.algorithm(algorithm);
    }
    if let Some(chunk_size) = opts.chunk_size {
        config = config.chunk_size(chunk_size);
    }

    Ok(config)
}

fn load_file(path: &Path, required: bool) -> Result<Option<FileConfig>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if !required && e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config {}", path.display()));
        }
    };

    tracing::debug!(path = %path.display(), "loading config file");
    let file = toml::from_str(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(Some(file))
}
