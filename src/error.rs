//! Crate-level error type.

use thiserror::Error;

use crate::eq::EqError;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration was read but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The audio output device could not be opened.
    #[error("audio output error: {0}")]
    AudioOutput(String),

    #[error("equalizer error: {0}")]
    Equalizer(#[from] EqError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
