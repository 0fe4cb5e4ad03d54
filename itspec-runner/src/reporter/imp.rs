// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{helpers::Styles, line::LineReporter, spec::SpecReporter};
use crate::{
    config::ReporterConfig, errors::WriteEventError, session::SessionStats, write_str::WriteStr,
};
use itspec_metadata::{TestItemSummary, TestOutcome};
use std::{
    fmt,
    io::{self, BufWriter},
};

/// Destination for reporter output.
///
/// This is usually standard output, but can be an in-memory buffer for tests or for hosts that
/// capture the rendered document.
pub enum ReporterOutput<'a> {
    /// Write output to standard output.
    Stdout,

    /// Write output to a buffer.
    Buffer(&'a mut Vec<u8>),
}

/// The kind of reporter to use for a session.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReporterKind {
    /// One line per test, with a status and the test's identity.
    #[default]
    Line,

    /// The describe/context/it document.
    Spec,
}

impl ReporterKind {
    /// Selects a reporter from the `--it` and `--it-no-color` flags.
    ///
    /// Asking for the spec reporter without color is also a request for the spec reporter.
    pub fn from_flags(it: bool, it_no_color: bool) -> Self {
        if it || it_no_color {
            Self::Spec
        } else {
            Self::Line
        }
    }

    /// Returns a short name for this reporter kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Spec => "spec",
        }
    }
}

impl fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verbosity level of a session: the number of `-v` flags minus the number of `-q` flags.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Verbosity(pub i8);

impl Verbosity {
    /// Returns true if test lines should be prefixed with the test's path.
    pub fn is_verbose(self) -> bool {
        self.0 > 0
    }

    /// Returns true if output should be reduced.
    pub fn is_quiet(self) -> bool {
        self.0 < 0
    }
}

/// Test reporter builder.
#[derive(Debug, Default)]
pub struct ReporterBuilder {
    kind: ReporterKind,
    should_colorize: bool,
    verbosity: Verbosity,
}

impl ReporterBuilder {
    /// Sets the kind of reporter to build.
    pub fn set_kind(&mut self, kind: ReporterKind) -> &mut Self {
        self.kind = kind;
        self
    }

    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Sets the verbosity level.
    pub fn set_verbosity(&mut self, verbosity: Verbosity) -> &mut Self {
        self.verbosity = verbosity;
        self
    }

    /// Creates a new reporter.
    pub fn build<'a>(
        &self,
        config: &ReporterConfig,
        output: ReporterOutput<'a>,
    ) -> Box<dyn Reporter + 'a> {
        let mut styles = Styles::default();
        if self.should_colorize {
            styles.colorize();
        }
        let writer = match output {
            ReporterOutput::Stdout => LineWriter::new(BufWriter::new(io::stdout())),
            ReporterOutput::Buffer(buf) => LineWriter::new(buf),
        };

        match self.kind {
            ReporterKind::Spec => Box::new(SpecReporter::new(
                config,
                styles,
                self.verbosity,
                writer,
            )),
            ReporterKind::Line => Box::new(LineReporter::new(
                config,
                styles,
                self.verbosity,
                writer,
            )),
        }
    }
}

/// Receives the events of a test session and renders them.
///
/// Reporters are driven by a [`TestSession`](crate::session::TestSession), which decides which
/// events are rendered: for example, only the `call` phase of a test is passed to
/// [`on_test_completed`](Self::on_test_completed) unless an earlier phase skipped it.
///
/// Every method takes `&mut self`, so a reporter can't be invoked from two places at once.
pub trait Reporter {
    /// Returns the kind of this reporter.
    fn kind(&self) -> ReporterKind;

    /// Called once when the session starts.
    fn on_session_started(&mut self, collect_only: bool) -> Result<(), WriteEventError> {
        let _ = collect_only;
        Ok(())
    }

    /// Called when a test starts running.
    fn on_test_started(&mut self, item: &TestItemSummary) -> Result<(), WriteEventError> {
        let _ = item;
        Ok(())
    }

    /// Called when a test has a final outcome.
    fn on_test_completed(
        &mut self,
        item: &TestItemSummary,
        outcome: TestOutcome,
    ) -> Result<(), WriteEventError>;

    /// Called in collect-only mode once all tests have been collected.
    fn on_collection_finished(
        &mut self,
        items: &[TestItemSummary],
    ) -> Result<(), WriteEventError>;

    /// Called once when the session finishes.
    fn on_session_finished(
        &mut self,
        stats: &SessionStats,
        collect_only: bool,
    ) -> Result<(), WriteEventError>;
}

/// Writes whole lines and separators to an underlying writer.
pub(crate) struct LineWriter<'a> {
    out: Box<dyn WriteStr + 'a>,
    at_line_start: bool,
}

impl<'a> LineWriter<'a> {
    pub(crate) fn new(out: impl WriteStr + 'a) -> Self {
        Self {
            out: Box::new(out),
            at_line_start: true,
        }
    }

    /// Writes `text` followed by a newline.
    pub(crate) fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_str(text)?;
        self.out.write_str("\n")?;
        self.at_line_start = true;
        Ok(())
    }

    /// Writes a blank separator line.
    ///
    /// If the cursor is in the middle of a line, this ends that line instead.
    pub(crate) fn write_separator(&mut self) -> io::Result<()> {
        self.write_line("")
    }

    /// Writes `text` without ending the line.
    pub(crate) fn write_partial(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.out.write_str(text)?;
        self.at_line_start = text.ends_with('\n');
        Ok(())
    }

    /// Ends the current line if a partial line was written.
    pub(crate) fn finish_line(&mut self) -> io::Result<()> {
        if !self.at_line_start {
            self.write_line("")?;
        }
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.out.write_str_flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(false, false, ReporterKind::Line; "no flags")]
    #[test_case(true, false, ReporterKind::Spec; "it")]
    #[test_case(false, true, ReporterKind::Spec; "it no color alone")]
    #[test_case(true, true, ReporterKind::Spec; "both")]
    fn kind_from_flags(it: bool, it_no_color: bool, expected: ReporterKind) {
        assert_eq!(ReporterKind::from_flags(it, it_no_color), expected);
    }

    #[test]
    fn line_writer_partial_lines() {
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut writer = LineWriter::new(&mut buf);
            writer.finish_line().unwrap();
            writer.write_partial("* a.py... ").unwrap();
            writer.finish_line().unwrap();
            writer.finish_line().unwrap();
            writer.write_partial("* b.py... ").unwrap();
            writer.write_separator().unwrap();
            writer.write_line("- x").unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "* a.py... \n* b.py... \n- x\n"
        );
    }
}
