// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use itspec_metadata::ItspecExitCode;
use itspec_runner::errors::*;
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that itspec knows how to report.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("failed to open events file")]
    EventsOpenError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("event stream parse error")]
    EventStreamParseError {
        #[from]
        err: EventStreamParseError,
    },
    #[error("session error")]
    SessionError {
        #[from]
        err: SessionError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigParseError { .. } | Self::EventsOpenError { .. } => {
                ItspecExitCode::USAGE_ERROR
            }
            Self::EventStreamParseError { .. } => ItspecExitCode::INTERNAL_ERROR,
            Self::SessionError {
                err: SessionError::WriteEvent(_),
            } => ItspecExitCode::WRITE_OUTPUT_ERROR,
            Self::SessionError { .. } => ItspecExitCode::INTERNAL_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse itspec config at `{}`",
                    err.config_file().style(styles.bold)
                );
                Some(err.kind() as &dyn Error)
            }
            Self::EventsOpenError { path, err } => {
                error!("failed to open events file `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::EventStreamParseError { err } => {
                error!("{err}");
                err.source()
            }
            Self::SessionError { err } => {
                error!("{err}");
                err.source()
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
