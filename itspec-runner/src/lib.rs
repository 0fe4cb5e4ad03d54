// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [cargo itspec](https://crates.io/crates/cargo-itspec).
//!
//! itspec renders the results of a test session as a nested specification document, grouping
//! tests under the `describe`, `context` and `it` annotations attached to them. The basic flow
//! is:
//!
//! 1. Read [`SessionEventSummary`](itspec_metadata::SessionEventSummary) instances from the host
//!    runner, for example with [`events::EventStream`].
//! 2. Build a reporter with [`reporter::ReporterBuilder`] and install it into a
//!    [`session::TestSession`].
//! 3. Feed each event to the session, then call [`session::TestSession::finish`] to write the
//!    summary and get the exit code.

pub mod annotations;
pub mod config;
pub mod errors;
pub mod events;
mod helpers;
pub mod reporter;
pub mod session;
pub mod write_str;
