//! Configuration loading: TOML file first, command line flags on top.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crm_model::{ModelError, PipelineConfig};

use crate::cli::RunArgs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ModelError),

    #[error("no input file given (pass INPUT or set `source` in the config file)")]
    MissingSource,
}

/// Reads `path`, or returns the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Applies command line overrides to a loaded configuration.
pub fn apply_overrides(mut config: PipelineConfig, args: &RunArgs) -> PipelineConfig {
    if let Some(input) = &args.input {
        config = config.with_source(input);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(origin) = &args.origin {
        config = config.with_origin(origin);
    }
    if let Some(database) = &args.database {
        config = config.with_database(database);
    }
    if let Some(order) = args.date_order {
        config = config.with_date_order(order.into());
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    config
}

/// Loads, overrides and validates the configuration for a run.
pub fn resolve_run_config(args: &RunArgs) -> Result<PipelineConfig, ConfigError> {
    let config = apply_overrides(load_config(args.config.as_deref())?, args);
    config.validate()?;
    if config.source.is_none() {
        return Err(ConfigError::MissingSource);
    }
    Ok(config)
}
