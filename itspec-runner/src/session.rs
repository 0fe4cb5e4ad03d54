// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lifecycle of a single test session.
//!
//! A [`TestSession`] receives [`SessionEventSummary`] instances from a host runner, keeps
//! [`SessionStats`] up to date, and forwards the events that should be rendered to its
//! [`Reporter`].

use crate::{errors::SessionError, reporter::Reporter};
use itspec_metadata::{
    ItspecExitCode, ReportPhase, SessionEventSummary, TestItemSummary, TestOutcome,
    TestReportSummary,
};
use tracing::debug;

/// Counts of test outcomes in a session.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SessionStats {
    /// The number of tests collected.
    pub collected: usize,

    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that were skipped.
    pub skipped: usize,

    /// The number of errors during setup or teardown.
    pub errors: usize,
}

impl SessionStats {
    /// Records the outcome of one phase of a test.
    pub fn record(&mut self, phase: ReportPhase, outcome: TestOutcome) {
        if outcome.is_failure() {
            // Failures outside the test body are errors in the fixtures, not test failures.
            match phase {
                ReportPhase::Call => self.failed += 1,
                ReportPhase::Setup | ReportPhase::Teardown => self.errors += 1,
            }
            return;
        }
        match (phase, outcome) {
            (_, TestOutcome::Skipped) => self.skipped += 1,
            (ReportPhase::Call, _) => self.passed += 1,
            (ReportPhase::Setup | ReportPhase::Teardown, _) => {}
        }
    }

    /// Returns true if any test failed or errored.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.errors > 0
    }

    /// Returns the exit code for a session with these stats.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            ItspecExitCode::TESTS_FAILED
        } else if self.collected == 0 && self.passed == 0 && self.skipped == 0 {
            ItspecExitCode::NO_TESTS_COLLECTED
        } else {
            ItspecExitCode::OK
        }
    }
}

/// A single test session.
///
/// Exactly one reporter can be installed into a session. Collect-only mode is fixed once the
/// session starts.
pub struct TestSession<'a> {
    collect_only: bool,
    started: bool,
    reporter: Option<Box<dyn Reporter + 'a>>,
    stats: SessionStats,
}

impl<'a> TestSession<'a> {
    /// Creates a new session.
    ///
    /// If `collect_only` is false, the mode is taken from the `session-started` event instead.
    pub fn new(collect_only: bool) -> Self {
        Self {
            collect_only,
            started: false,
            reporter: None,
            stats: SessionStats::default(),
        }
    }

    /// Installs the reporter for this session.
    ///
    /// Returns an error if a reporter is already installed.
    pub fn install_reporter(
        &mut self,
        reporter: Box<dyn Reporter + 'a>,
    ) -> Result<(), SessionError> {
        if let Some(existing) = &self.reporter {
            return Err(SessionError::ReporterAlreadyInstalled {
                existing: existing.kind().as_str(),
            });
        }
        debug!("installing {} reporter", reporter.kind());
        self.reporter = Some(reporter);
        Ok(())
    }

    /// Returns true if this session only collects tests.
    pub fn is_collect_only(&self) -> bool {
        self.collect_only
    }

    /// Returns the stats recorded so far.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Handles an event from the host runner.
    pub fn handle_event(&mut self, event: &SessionEventSummary) -> Result<(), SessionError> {
        match event {
            SessionEventSummary::SessionStarted { collect_only } => {
                self.on_session_started(*collect_only)
            }
            SessionEventSummary::CollectionFinished { items } => self.on_collection_finished(items),
            SessionEventSummary::TestStarted { item } => self.on_test_started(item),
            SessionEventSummary::TestReport(report) => self.on_test_completed(report),
            SessionEventSummary::SessionFinished => {
                // The summary is written by `finish`, which also runs for truncated streams.
                debug!("host reported session finished");
                Ok(())
            }
        }
    }

    fn on_session_started(&mut self, collect_only: bool) -> Result<(), SessionError> {
        if self.started {
            debug!("ignoring repeated session-started event");
            return Ok(());
        }
        self.collect_only |= collect_only;
        self.ensure_started()
    }

    fn on_collection_finished(&mut self, items: &[TestItemSummary]) -> Result<(), SessionError> {
        self.ensure_started()?;
        self.stats.collected = items.len();
        if self.collect_only {
            self.reporter_mut()?.on_collection_finished(items)?;
        }
        Ok(())
    }

    fn on_test_started(&mut self, item: &TestItemSummary) -> Result<(), SessionError> {
        self.ensure_started()?;
        if !self.collect_only {
            self.reporter_mut()?.on_test_started(item)?;
        }
        Ok(())
    }

    fn on_test_completed(&mut self, report: &TestReportSummary) -> Result<(), SessionError> {
        self.ensure_started()?;
        self.stats.record(report.phase, report.outcome);

        let should_render = report.phase == ReportPhase::Call
            || report.outcome == TestOutcome::Skipped;
        if self.collect_only || !should_render {
            debug!(
                "not rendering {} report for {} ({})",
                report.phase, report.item.id, report.outcome,
            );
            return Ok(());
        }
        self.reporter_mut()?
            .on_test_completed(&report.item, report.outcome)?;
        Ok(())
    }

    /// Finishes the session, writing the summary.
    pub fn finish(mut self) -> Result<SessionStats, SessionError> {
        self.ensure_started()?;
        let stats = self.stats;
        let collect_only = self.collect_only;
        self.reporter_mut()?
            .on_session_finished(&stats, collect_only)?;
        Ok(stats)
    }

    // Hosts that don't send `session-started` still get a started session.
    fn ensure_started(&mut self) -> Result<(), SessionError> {
        if !self.started {
            self.started = true;
            let collect_only = self.collect_only;
            self.reporter_mut()?.on_session_started(collect_only)?;
        }
        Ok(())
    }

    fn reporter_mut(&mut self) -> Result<&mut (dyn Reporter + 'a), SessionError> {
        self.reporter
            .as_deref_mut()
            .ok_or(SessionError::NoReporterInstalled)
    }
}
