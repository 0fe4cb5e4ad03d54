// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by itspec.

use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse itspec config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),

    /// An implicit-it prefix was empty, which would turn every test into an `It:` line.
    #[error("invalid implicit-it prefix at index {index}: prefixes must not be empty")]
    EmptyImplicitItPrefix {
        /// The index of the empty prefix.
        index: usize,
    },
}

/// An error that occurs while writing an event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[from] std::io::Error),
}

/// An error that occurs while setting up or driving a test session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// A reporter was installed into a session that already has one.
    #[error("a {existing} reporter is already installed for this session")]
    ReporterAlreadyInstalled {
        /// The kind of reporter that was installed first.
        existing: &'static str,
    },

    /// An event was received before any reporter was installed.
    #[error("no reporter installed for this session")]
    NoReporterInstalled,

    /// Writing an event failed.
    #[error("error writing session event")]
    WriteEvent(#[from] WriteEventError),
}

/// An error that occurs while reading a stream of session events.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EventStreamParseError {
    /// An error occurred while reading from the input.
    #[error("error reading session events")]
    Read(#[source] std::io::Error),

    /// A line could not be parsed as a session event.
    #[error("invalid session event on line {line_number}")]
    InvalidEvent {
        /// The 1-based line number of the invalid event.
        line_number: usize,

        /// The underlying JSON error.
        #[source]
        error: serde_json::Error,
    },
}
