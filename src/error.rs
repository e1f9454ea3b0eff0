//! Error types for configuration, input reading and uploads.
use std::path::PathBuf;

use thiserror::Error;

/// Problems with `~/.config/bakeit.cfg`. All of them are fatal and are
/// raised before any input is read or any request is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the home directory to locate the config file")]
    NoHomeDir,

    #[error(
        "Config file not found. Make sure you have a config file at {} with a \
         [pastery] section containing your Pastery API key, which you can get \
         from your https://www.pastery.net account page.",
        .path.display()
    )]
    NotFound { path: PathBuf },

    #[error("could not read config file {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Config file {} is invalid: {message}",
        .path.display()
    )]
    Invalid { path: PathBuf, message: String },

    #[error(
        "Pastery API key not found in the [pastery] section of {}. Get it from \
         your https://www.pastery.net account page.",
        .path.display()
    )]
    MissingApiKey { path: PathBuf },
}

/// The content to upload could not be read.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("could not read {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read standard input")]
    Stdin(#[source] std::io::Error),
}

/// Why an upload did not produce a URL.
///
/// Both variants render as the bare message so the caller can print them
/// as `ERROR: <message>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Pastery answered and refused the paste.
    #[error("{0}")]
    Rejected(String),

    /// The exchange with Pastery did not complete.
    #[error("{0}")]
    Transport(String),
}

impl UploadError {
    pub fn is_transport(&self) -> bool {
        matches!(self, UploadError::Transport(_))
    }

    pub fn message(&self) -> &str {
        match self {
            UploadError::Rejected(msg) | UploadError::Transport(msg) => msg,
        }
    }
}
