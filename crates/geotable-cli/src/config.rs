//! Discovery and loading of the CLI's TOML configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use geotable::{GeoTableError, config::AppConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for GeoTableError {
    fn from(err: ConfigError) -> Self {
        GeoTableError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Load the configuration for this run.
///
/// An explicit path must exist. Without one, the first existing file of
/// `geotable/config.toml` and the platform config directory is used, and
/// the defaults apply when neither exists.
///
/// # Errors
///
/// Returns an error when the explicit file is missing, or when the chosen
/// file cannot be read or is not a valid configuration.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, GeoTableError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        return read_config(path);
    }

    match discovered_paths().into_iter().find(|path| path.exists()) {
        Some(path) => {
            info!(path = path.display().to_string(); "Loading discovered configuration");
            read_config(&path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Candidate locations, most specific first.
fn discovered_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("geotable").join("config.toml")];
    match ProjectDirs::from("com", "geotable", "geotable") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

fn read_config(path: &Path) -> Result<AppConfig, GeoTableError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_explicit_config_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ncant_inches = 4.5").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.report().cant_inches(), 4.5);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml")));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_malformed_config_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ncant_inches = \"lots\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();

        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }
}
