//! Configuration de la page, chargée depuis un fichier JSON

use crate::popup::Screen;
use crate::utils::separators::FormatSeparators;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, ErrorKind::NotFound},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot access config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Cannot write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub separators: FormatSeparators,
    pub screen: Screen,
}

impl AppConfig {
    /// Lit la configuration, ou crée un fichier avec les valeurs par défaut
    /// s'il n'existe pas encore.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        match File::open(path) {
            Ok(f) => {
                let config: Self =
                    serde_json::from_reader(f).map_err(|source| ConfigError::Parse {
                        path: path.to_owned(),
                        source,
                    })?;
                info!("Loaded config from {}: {}", path.display(), config.separators);
                Ok(config)
            }

            Err(not_found) if not_found.kind() == NotFound => {
                info!("Config file not found, writing defaults to {}", path.display());
                let config = Self::default();
                config.save(path)?;
                Ok(config)
            }

            Err(source) => Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_owned(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(file, self).map_err(|source| ConfigError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, process};

    fn scratch(name: &str) -> PathBuf {
        env::temp_dir().join(format!("procura-{}-{name}.json", process::id()))
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let path = scratch("missing");
        let _ = fs::remove_file(&path);

        let config = AppConfig::open(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists(), "Default config was not written");

        let reloaded = AppConfig::open(&path).unwrap();
        assert_eq!(reloaded, config);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_reads_separators_and_screen() {
        let path = scratch("chilean");
        fs::write(
            &path,
            r#"{"separators": {"decimal": ",", "thousands": "."},
                "screen": {"width": 1280, "height": 720}}"#,
        )
        .unwrap();

        let config = AppConfig::open(&path).unwrap();
        assert_eq!(config.separators, FormatSeparators::chilean());
        assert_eq!(config.screen, Screen { width: 1280, height: 720 });
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = scratch("partial");
        fs::write(&path, r#"{"screen": {"width": 1024, "height": 768}}"#).unwrap();

        let config = AppConfig::open(&path).unwrap();
        assert_eq!(config.separators, FormatSeparators::default());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_errors_are_not_parse_errors() {
        let missing_dir = scratch("no-such-dir").join("procura.json");
        let err = AppConfig::default().save(&missing_dir).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "Unexpected error: {err}");

        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ConfigError::Write {
            path: PathBuf::from("procura.json"),
            source,
        };
        assert!(err.to_string().starts_with("Cannot write config file procura.json"),
                "Unexpected message: {err}");
    }

    #[test]
    fn test_identical_separators_rejected() {
        let path = scratch("identical");
        fs::write(&path, r#"{"separators": {"decimal": ".", "thousands": "."}}"#).unwrap();

        let err = AppConfig::open(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "Unexpected error: {err}");
        assert!(err.to_string().contains("must differ"), "Unexpected message: {err}");
        fs::remove_file(&path).unwrap();
    }
}
