//! User configuration file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_core::Filter;

use crate::keybindings::{Command, Keybindings};
use crate::theme::ThemeMode;

pub const APP_DIR: &str = "tui-todo";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid key {key:?} bound to {command:?}")]
    InvalidKey { command: Command, key: String },
}

/// Contents of `config.json`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: Option<ThemeMode>,
    /// Filter selected at startup
    pub filter: Option<Filter>,
    /// Overrides merged over [`Keybindings::defaults`]
    pub keybindings: Keybindings,
}

/// `<config_dir>/tui-todo/config.json`, if the platform has a config dir
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load from an explicit path (must exist) or the default location
    /// (missing file means defaults).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    tracing::debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        if let Some((command, key)) = config.keybindings.invalid_keys().into_iter().next() {
            return Err(ConfigError::InvalidKey { command, key });
        }
        Ok(config)
    }

    /// Defaults with this file's overrides applied
    pub fn keybindings(&self) -> Keybindings {
        Keybindings::merge(Keybindings::defaults(), self.keybindings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::BindingContext;
    use crate::testing::key;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_json(
            r#"{
                "theme": "light",
                "filter": "active",
                "keybindings": { "list": { "quit": ["ctrl+q"] } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.theme, Some(ThemeMode::Light));
        assert_eq!(config.filter, Some(Filter::Active));

        let bindings = config.keybindings();
        assert_eq!(
            bindings.get_command(key("ctrl+q"), BindingContext::List),
            Some(Command::Quit)
        );
        assert_eq!(bindings.get_command(key("q"), BindingContext::List), None);
        assert_eq!(
            bindings.get_command(key("d"), BindingContext::List),
            Some(Command::Delete)
        );
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let err = Config::from_json(r#"{ "theme": "solarized" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_json(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let err = Config::from_json(r#"{ "keybindings": { "input": { "submit": ["hyper+enter"] } } }"#)
            .unwrap_err();
        match err {
            ConfigError::InvalidKey { command, key } => {
                assert_eq!(command, Command::Submit);
                assert_eq!(key, "hyper+enter");
            }
            other => panic!("expected InvalidKey, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = std::env::temp_dir().join(format!("tui-todo-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE), "{err}");

        fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().theme, Some(ThemeMode::Dark));
        fs::remove_dir_all(&dir).unwrap();
    }
}
