use config::{Config, Environment, File};
use std::path::PathBuf;

use crate::{AppConfig, ConfigError, Result};

/// File read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "warddata.toml";

/// Prefix of environment overrides, e.g. `WARDDATA__DATABASE__POOL_SIZE=8`.
pub const ENV_PREFIX: &str = "WARDDATA";

pub fn load_config(path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();
    match path {
        Some(p) => {
            let pathbuf = PathBuf::from(p);
            if !pathbuf.exists() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {p}"),
                )));
            }
            builder = builder.add_source(File::from(pathbuf));
        }
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                builder = builder.add_source(File::from(default_path));
            }
        }
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .separator("__"),
    );
    let merged: AppConfig = builder.build()?.try_deserialize()?;
    merged.validate().map_err(ConfigError::validation)?;
    Ok(merged)
}
