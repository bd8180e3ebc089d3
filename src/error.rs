// SPDX-License-Identifier: MPL-2.0
use crate::search::api::ApiError;
use thiserror::Error;

/// Application-level failures outside the search request path.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("settings file I/O failed: {0}")]
    Io(String),
    #[error("invalid settings: {0}")]
    Config(String),
    #[error("search client unavailable: {0}")]
    Api(#[from] ApiError),
}

impl Error {
    /// i18n key of the notice shown in the status line.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) | Error::Config(_) => "notification-config-load-error",
            Error::Api(_) => "notification-client-error",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
