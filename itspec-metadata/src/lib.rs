// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the records a host test runner hands to itspec.
//!
//! A host runner (or an adapter around one) describes its session as a stream of
//! [`SessionEventSummary`] values, serialized as JSON lines. Each event carries one or more
//! [`TestItemSummary`] records: the test's identity, display name, module, and the annotations
//! attached to it.
//!
//! This crate only defines the data model. Rendering lives in `itspec-runner`.

mod events;
mod exit_codes;
mod test_item;

pub use events::*;
pub use exit_codes::*;
pub use test_item::*;
