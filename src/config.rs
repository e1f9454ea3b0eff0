use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, Properties};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://www.pastery.net/api/paste/";

const SECTION: &str = "pastery";

/// Settings read from the `[pastery]` section of `~/.config/bakeit.cfg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    /// Default paste lifetime in minutes, used when `--duration` is absent.
    pub duration: Option<i64>,
    pub api_url: String,
    /// Transport timeout in seconds.
    pub timeout: Option<u64>,
}

impl Config {
    /// `~/.config/bakeit.cfg`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".config").join("bakeit.cfg"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_ini_str(&text, path)?;
        tracing::debug!(path = %path.display(), api_url = %config.api_url, "loaded config");
        Ok(config)
    }

    /// Parse the INI file contents. `path` is only used in error messages.
    ///
    /// Values may be bare (`api_key = 0123abcd`) or quoted. Blank values
    /// count as absent.
    pub fn from_ini_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        };

        let ini = Ini::load_from_str(text).map_err(|e| invalid(e.to_string()))?;
        let section = ini
            .section(Some(SECTION))
            .ok_or_else(|| invalid(format!("no [{}] section", SECTION)))?;

        let api_key = value(section, "api_key").ok_or_else(|| ConfigError::MissingApiKey {
            path: path.to_path_buf(),
        })?;

        Ok(Config {
            api_key: api_key.to_string(),
            duration: number(section, "duration").map_err(invalid)?,
            api_url: value(section, "api_url")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            timeout: number(section, "timeout").map_err(invalid)?,
        })
    }
}

fn value<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn number<T>(section: &Properties, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    value(section, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| format!("{} = {:?} is not a valid number: {}", key, raw, e))
        })
        .transpose()
}
