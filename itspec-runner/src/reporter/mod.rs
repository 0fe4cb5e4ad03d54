// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report the results of a test session as human-readable text.
//!
//! Two reporters are available:
//!
//! * The spec reporter renders describe/context/it annotations as an indented document, printing
//!   each group header once per contiguous run of tests that share it.
//! * The line reporter prints one line per test, for when the spec reporter isn't requested.
//!
//! Reporters are constructed via a [`ReporterBuilder`] and driven by a
//! [`TestSession`](crate::session::TestSession).

mod helpers;
mod imp;
mod line;
mod spec;

pub use imp::*;
