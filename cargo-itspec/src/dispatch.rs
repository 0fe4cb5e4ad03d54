// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level application and command routing.

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Subcommand};
use itspec_runner::{
    config::ItspecConfig,
    errors::EventStreamParseError,
    events::EventStream,
    reporter::{ReporterBuilder, ReporterKind},
    session::TestSession,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};
use tracing::{debug, warn};

/// Renders test results as a nested describe/context/it document.
///
/// This binary should typically be invoked as `cargo itspec` (in which case
/// this message will not be seen), not `cargo-itspec`.
#[derive(Debug, clap::Parser)]
#[command(
    version,
    bin_name = "cargo",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct CargoItspecApp {
    #[clap(subcommand)]
    subcommand: ItspecSubcommand,
}

impl CargoItspecApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        match &self.subcommand {
            ItspecSubcommand::Itspec(app) => app.output.init(),
        }
    }

    /// Returns the output context without initializing logging.
    #[cfg(test)]
    pub(crate) fn output_context(&self) -> OutputContext {
        match &self.subcommand {
            ItspecSubcommand::Itspec(app) => app.output.context(),
        }
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.subcommand {
            ItspecSubcommand::Itspec(app) => app.exec(output, output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum ItspecSubcommand {
    /// Renders test results as a nested describe/context/it document.
    Itspec(Box<AppOpts>),
}

/// Main app options (under `cargo itspec`).
#[derive(Debug, Args)]
#[clap(version, display_name = "cargo-itspec")]
struct AppOpts {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(flatten)]
    config_opts: ConfigOpts,

    #[clap(subcommand)]
    command: Command,
}

impl AppOpts {
    fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Run(run_opts) => run_opts.exec(&self.config_opts, output, output_writer),
        }
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Config options")]
struct ConfigOpts {
    /// Directory to look for `.config/itspec.toml` in [default: current directory]
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<Utf8PathBuf>,

    /// Config file [default: <root>/.config/itspec.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl ConfigOpts {
    fn make_config(&self) -> Result<ItspecConfig> {
        let root = self.root.as_deref().unwrap_or(Utf8Path::new("."));
        Ok(ItspecConfig::from_sources(root, self.config_file.as_deref())?)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a stream of session events from a host test runner
    ///
    /// Events are read as JSON lines, one event per line.
    Run(RunOpts),
}

#[derive(Debug, Args)]
struct RunOpts {
    /// File to read session events from, or `-` for standard input
    #[arg(value_name = "EVENTS")]
    events: Option<Utf8PathBuf>,

    /// Render tests as a nested describe/context/it document
    #[arg(long, help_heading = "Reporter options")]
    it: bool,

    /// Render the describe/context/it document without color
    #[arg(long, help_heading = "Reporter options")]
    it_no_color: bool,

    /// Render the collected tests instead of test results
    #[arg(long, help_heading = "Reporter options")]
    collect_only: bool,
}

impl RunOpts {
    fn exec(
        self,
        config_opts: &ConfigOpts,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        let config = config_opts.make_config()?;

        let kind = ReporterKind::from_flags(self.it, self.it_no_color);
        let should_colorize =
            !self.it_no_color && output.color.should_colorize(supports_color::Stream::Stdout);
        debug!("using {kind} reporter (colorize: {should_colorize})");

        let mut builder = ReporterBuilder::default();
        builder
            .set_kind(kind)
            .set_colorize(should_colorize)
            .set_verbosity(output.verbosity);
        let reporter = builder.build(config.reporter(), output_writer.reporter_output());

        let mut session = TestSession::new(self.collect_only);
        session.install_reporter(reporter)?;

        for event in EventStream::new(open_events(self.events.as_deref())?) {
            let event = match event {
                Ok(event) => event,
                // A malformed event only loses that event: its neighbors still render, and the
                // exit code still comes from the session.
                Err(EventStreamParseError::InvalidEvent { line_number, error }) => {
                    warn!("skipping invalid session event on line {line_number}: {error}");
                    continue;
                }
                Err(error) => return Err(error.into()),
            };
            session.handle_event(&event)?;
        }

        let stats = session.finish()?;
        Ok(stats.exit_code())
    }
}

fn open_events(path: Option<&Utf8Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path.as_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path).map_err(|err| ExpectedError::EventsOpenError {
                path: path.to_owned(),
                err,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}
