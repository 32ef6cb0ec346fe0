//! Application wide error type.
//! Everything here is terminal, nothing gets retried.

use std::io;

use thiserror::Error;

use crate::{alarm::SurfaceError, session::SessionError, time_spec::ParseError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Either the --at or the --in option must be given, but not both")]
    Usage,

    #[error("Error parsing time at which to ring the alarm: {0}")]
    Parse(#[from] ParseError),

    #[error("Couldn't show the alarm window: {0}")]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// usage and parse errors mean the command line was wrong
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage | Self::Parse(_))
    }

    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_usage() {
            2
        } else {
            1
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
