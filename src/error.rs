// Copyright 2025 Martin Pool

//! Error type shared by all of cwlens.

use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// An error from an AWS API call, passed through without retry.
    #[error("AWS error: {0}")]
    Cloud(Box<dyn std::error::Error + Send + Sync>),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Nothing matches {0:?}")]
    NoMatch(String),

    /// The operator cancelled an interactive prompt.
    #[error("Interrupted")]
    Interrupted,
}

impl Error {
    /// True if this error should end the program quietly with a success status.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Error::Interrupted)
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io_err) if io_err.kind() == io::ErrorKind::Interrupted => {
                Error::Interrupted
            }
            dialoguer::Error::IO(io_err) => Error::Io(io_err),
        }
    }
}
