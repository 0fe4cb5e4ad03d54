// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render test results as a nested describe/context/it document.
//!
//! `cargo itspec run` reads a stream of session events from a host test runner and renders them
//! either as one line per test or, with `--it`, as an indented specification document.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;
#[cfg(test)]
mod tests_integration;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
