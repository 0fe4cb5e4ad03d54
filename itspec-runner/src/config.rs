// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for itspec.
//!
//! Configuration is read from a TOML file layered on top of an embedded default config. See
//! [`ItspecConfig::DEFAULT_CONFIG`] for the available settings.

use crate::{
    errors::{ConfigParseError, ConfigParseErrorKind},
    helpers::capitalize,
};
use camino::Utf8Path;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Overall configuration for itspec.
#[derive(Clone, Debug)]
pub struct ItspecConfig {
    reporter: ReporterConfig,
}

impl ItspecConfig {
    /// The default location of the config within the root directory: `.config/itspec.toml`.
    pub const CONFIG_PATH: &'static str = ".config/itspec.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the itspec config from the given file, or if not specified from
    /// `.config/itspec.toml` in the root directory.
    ///
    /// An explicitly specified file must exist. If no file is specified and the root directory
    /// doesn't have `.config/itspec.toml`, the default config is used.
    pub fn from_sources(
        root: impl AsRef<Utf8Path>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = root.as_ref().join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };
        debug!("reading itspec config from {config_file}");

        let builder = Self::make_default_config().add_source(source);
        Self::build_and_deserialize(&config_file, &builder)
    }

    /// Returns the default itspec config.
    pub fn default_config() -> Self {
        let builder = Self::make_default_config();
        Self::build_and_deserialize(Utf8Path::new("<default config>"), &builder)
            .expect("default config is always valid")
    }

    /// Returns the reporter configuration.
    pub fn reporter(&self) -> &ReporterConfig {
        &self.reporter
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build_and_deserialize(
        config_file: &Utf8Path,
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigParseError> {
        let config = builder.build_cloned().map_err(|error| {
            ConfigParseError::new(
                config_file,
                ConfigParseErrorKind::BuildError(Box::new(error)),
            )
        })?;

        let mut unknown = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            unknown.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let deserialized: ItspecConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseError::new(
                    config_file,
                    ConfigParseErrorKind::DeserializeError(Box::new(
                        serde_path_to_error::Error::new(path, error),
                    )),
                )
            })?;

        for key in &unknown {
            warn!("ignoring unknown config key `{key}` in {config_file}");
        }

        let reporter = deserialized
            .reporter
            .into_config()
            .map_err(|kind| ConfigParseError::new(config_file, kind))?;
        Ok(Self { reporter })
    }
}

/// Configuration for the reporters.
#[derive(Clone, Debug)]
pub struct ReporterConfig {
    implicit_it_prefixes: ImplicitItPrefixes,
    file_headers: bool,
    summary: bool,
}

impl ReporterConfig {
    /// Returns the prefixes that turn a test name into an implicit `It:` label.
    pub fn implicit_it_prefixes(&self) -> &ImplicitItPrefixes {
        &self.implicit_it_prefixes
    }

    /// Returns true if a `* file... ` header should be printed when a run moves to a new file.
    pub fn file_headers(&self) -> bool {
        self.file_headers
    }

    /// Returns true if a summary line should be printed at the end of the session.
    pub fn summary(&self) -> bool {
        self.summary
    }
}

/// Test-name prefixes that imply an `it` annotation.
///
/// A test named `test_it_does_something` with the prefix `test_it_` is labelled
/// `It: Does something`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImplicitItPrefixes {
    prefixes: Vec<String>,
}

impl ImplicitItPrefixes {
    /// Creates a new set of prefixes, checked in the given order.
    ///
    /// Empty prefixes are not allowed: use [`ItspecConfig::from_sources`] to get validation.
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the prefixes in the order they're checked.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.prefixes.iter().map(|p| p.as_str())
    }

    /// Returns the humanized label for `name`, or `None` if it doesn't follow the naming
    /// convention.
    ///
    /// The first matching prefix is stripped, underscores become spaces, and the result is
    /// capitalized. A name that consists of the prefix alone does not match.
    pub fn humanize(&self, name: &str) -> Option<String> {
        self.prefixes.iter().find_map(|prefix| {
            let rest = name.strip_prefix(prefix.as_str())?;
            (!rest.is_empty()).then(|| capitalize(&rest.replace('_', " ")))
        })
    }
}

impl Default for ImplicitItPrefixes {
    fn default() -> Self {
        ItspecConfig::default_config()
            .reporter
            .implicit_it_prefixes
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ItspecConfigDeserialize {
    reporter: ReporterConfigDeserialize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReporterConfigDeserialize {
    implicit_it_prefixes: Vec<String>,
    file_headers: bool,
    summary: bool,
}

impl ReporterConfigDeserialize {
    fn into_config(self) -> Result<ReporterConfig, ConfigParseErrorKind> {
        if let Some(index) = self.implicit_it_prefixes.iter().position(|p| p.is_empty()) {
            return Err(ConfigParseErrorKind::EmptyImplicitItPrefix { index });
        }
        Ok(ReporterConfig {
            implicit_it_prefixes: ImplicitItPrefixes::new(self.implicit_it_prefixes),
            file_headers: self.file_headers,
            summary: self.summary,
        })
    }
}
