// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `cargo itspec` runs.
///
/// These mirror the exit codes of the host test runners itspec sits in front of, so that wrapping
/// a runner with itspec never changes how CI interprets the result. The exit code is computed
/// from the session's statistics alone: which reporter was used has no effect on it.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum ItspecExitCode {}

impl ItspecExitCode {
    /// All tests that ran passed (skipped tests count as passing).
    pub const OK: i32 = 0;

    /// One or more tests failed, or a setup or teardown phase errored.
    pub const TESTS_FAILED: i32 = 1;

    /// An internal error occurred, for example the event stream could not be read or parsed.
    pub const INTERNAL_ERROR: i32 = 3;

    /// A user issue happened while setting up an itspec invocation, for example an invalid
    /// configuration file.
    pub const USAGE_ERROR: i32 = 4;

    /// The session finished without collecting any tests.
    pub const NO_TESTS_COLLECTED: i32 = 5;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
