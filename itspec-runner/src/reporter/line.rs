// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The default reporter: one line per test.

use super::{
    LineWriter, Reporter, ReporterKind, Verbosity,
    helpers::{Styles, write_summary},
};
use crate::{config::ReporterConfig, errors::WriteEventError, session::SessionStats};
use itspec_metadata::{TestItemSummary, TestOutcome};
use owo_colors::OwoColorize;

pub(super) struct LineReporter<'a> {
    writer: LineWriter<'a>,
    styles: Styles,
    summary: bool,
}

impl<'a> LineReporter<'a> {
    pub(super) fn new(
        config: &ReporterConfig,
        styles: Styles,
        _verbosity: Verbosity,
        writer: LineWriter<'a>,
    ) -> Self {
        Self {
            writer,
            styles,
            summary: config.summary(),
        }
    }
}

impl Reporter for LineReporter<'_> {
    fn kind(&self) -> ReporterKind {
        ReporterKind::Line
    }

    fn on_test_completed(
        &mut self,
        item: &TestItemSummary,
        outcome: TestOutcome,
    ) -> Result<(), WriteEventError> {
        let status = match outcome {
            TestOutcome::Passed => "PASS",
            TestOutcome::Failed => "FAIL",
            TestOutcome::Skipped => "SKIP",
        };
        let style = self.styles.outcome(Some(outcome));
        self.writer
            .write_line(&format!("{:>12} {}", status.style(style), item.id))?;
        self.writer.flush()?;
        Ok(())
    }

    fn on_collection_finished(
        &mut self,
        items: &[TestItemSummary],
    ) -> Result<(), WriteEventError> {
        for item in items {
            self.writer.write_line(&item.id)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn on_session_finished(
        &mut self,
        stats: &SessionStats,
        collect_only: bool,
    ) -> Result<(), WriteEventError> {
        if self.summary {
            write_summary(stats, collect_only, &self.styles, &mut self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
