// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::TestItemSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An event in a test session, as reported by the host runner.
///
/// Serialized as a JSON object with a `type` field, one event per line.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SessionEventSummary {
    /// The session started.
    #[serde(rename_all = "kebab-case")]
    SessionStarted {
        /// True if the host is only collecting tests, not running them.
        #[serde(default)]
        collect_only: bool,
    },

    /// The host finished collecting tests.
    CollectionFinished {
        /// The collected tests, in the order they will run.
        items: Vec<TestItemSummary>,
    },

    /// A test started running.
    TestStarted {
        /// The test that started.
        item: TestItemSummary,
    },

    /// A phase of a test finished.
    TestReport(TestReportSummary),

    /// The session finished.
    SessionFinished,
}

/// The outcome of one phase of a test.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TestReportSummary {
    /// The test this report is for.
    pub item: TestItemSummary,

    /// The phase that finished.
    pub phase: ReportPhase,

    /// The outcome of that phase.
    pub outcome: TestOutcome,
}

/// A phase of a single test's execution.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPhase {
    /// Fixtures are being set up.
    Setup,
    /// The test body is running.
    Call,
    /// Fixtures are being torn down.
    Teardown,
}

impl fmt::Display for ReportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Call => write!(f, "call"),
            Self::Teardown => write!(f, "teardown"),
        }
    }
}

/// The outcome of a test phase.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TestOutcome {
    /// The phase passed.
    Passed,
    /// The phase failed.
    Failed,
    /// The test was skipped during this phase.
    Skipped,
}

impl TestOutcome {
    /// Returns true if this outcome is a failure.
    pub fn is_failure(self) -> bool {
        self == Self::Failed
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn parse_events() {
        let lines = [
            r#"{"type": "session-started", "collect-only": true}"#,
            r#"{"type": "session-started"}"#,
            r#"{"type": "collection-finished", "items": [{"id": "m.py::t", "name": "t"}]}"#,
            r#"{"type": "test-started", "item": {"id": "m.py::t", "name": "t"}}"#,
            r#"{"type": "test-report", "item": {"id": "m.py::t", "name": "t"}, "phase": "call", "outcome": "passed"}"#,
            r#"{"type": "session-finished"}"#,
        ];
        let events: Vec<SessionEventSummary> = lines
            .iter()
            .map(|line| serde_json::from_str(line).expect("valid event"))
            .collect();

        let item = TestItemSummary::new("m.py::t", "t");
        assert_eq!(
            events,
            vec![
                SessionEventSummary::SessionStarted { collect_only: true },
                SessionEventSummary::SessionStarted {
                    collect_only: false
                },
                SessionEventSummary::CollectionFinished {
                    items: vec![item.clone()]
                },
                SessionEventSummary::TestStarted { item: item.clone() },
                SessionEventSummary::TestReport(TestReportSummary {
                    item,
                    phase: ReportPhase::Call,
                    outcome: TestOutcome::Passed,
                }),
                SessionEventSummary::SessionFinished,
            ]
        );
    }

    #[test_case(r#"{"type": "test-finished"}"#; "unknown type")]
    #[test_case(r#"{"type": "test-started"}"#; "missing item")]
    #[test_case(r#"{"type": "test-report", "item": {"id": "a", "name": "a"}, "phase": "call", "outcome": "xfailed"}"#; "unknown outcome")]
    fn parse_invalid_event(input: &str) {
        serde_json::from_str::<SessionEventSummary>(input).expect_err("invalid event");
    }
}
