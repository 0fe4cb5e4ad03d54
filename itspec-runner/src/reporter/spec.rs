// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The describe/context/it reporter.
//!
//! Each test is rendered by diffing its chain of groups against the chain of the test rendered
//! just before it. Headers are printed from the first position where the two chains differ, so
//! a group is printed once per contiguous run of tests sharing it:
//!
//! ```text
//! - Describe: A basic foo...
//!
//!   - Context: When called with no arguments...
//!
//!     - ...and also in another circumstance...
//!       - ✓ It: Does something
//!       - F It: Does something else
//! ```

use super::{
    LineWriter, Reporter, ReporterKind, Verbosity,
    helpers::{Styles, write_summary},
};
use crate::{
    annotations::{Annotation, AnnotationKind, SpecItem},
    config::{ImplicitItPrefixes, ReporterConfig},
    errors::WriteEventError,
    helpers::{capitalize, uncapitalize},
    session::SessionStats,
};
use itspec_metadata::{TestItemSummary, TestOutcome};
use owo_colors::OwoColorize;
use std::io;
use swrite::{SWrite, swrite};
use tracing::debug;

const INDENT: &str = "  ";

/// Headers at or above this depth are preceded by a blank line.
const MAX_SEPARATED_DEPTH: usize = 3;

pub(super) struct SpecReporter<'a> {
    writer: LineWriter<'a>,
    opts: FormatOptions,
    prefixes: ImplicitItPrefixes,
    file_headers: bool,
    summary: bool,
    prev: Option<SpecItem>,
    current_file: Option<String>,
}

impl<'a> SpecReporter<'a> {
    pub(super) fn new(
        config: &ReporterConfig,
        styles: Styles,
        verbosity: Verbosity,
        writer: LineWriter<'a>,
    ) -> Self {
        Self {
            writer,
            opts: FormatOptions {
                styles,
                verbose: verbosity.is_verbose(),
            },
            prefixes: config.implicit_it_prefixes().clone(),
            file_headers: config.file_headers() && !verbosity.is_quiet(),
            summary: config.summary(),
            prev: None,
            current_file: None,
        }
    }
}

impl Reporter for SpecReporter<'_> {
    fn kind(&self) -> ReporterKind {
        ReporterKind::Spec
    }

    fn on_test_started(&mut self, item: &TestItemSummary) -> Result<(), WriteEventError> {
        if !self.file_headers || self.current_file.as_deref() == Some(item.file()) {
            return Ok(());
        }
        self.current_file = Some(item.file().to_owned());

        self.writer.finish_line()?;
        self.writer.write_separator()?;
        self.writer.write_partial(&format!("* {}... ", item.file()))?;
        self.writer.flush()?;
        Ok(())
    }

    fn on_test_completed(
        &mut self,
        item: &TestItemSummary,
        outcome: TestOutcome,
    ) -> Result<(), WriteEventError> {
        let current = SpecItem::new(item, &self.prefixes);
        write_item(
            self.prev.as_ref(),
            &current,
            Some(outcome),
            &self.opts,
            &mut self.writer,
        )?;
        self.prev = Some(current);
        self.writer.flush()?;
        Ok(())
    }

    fn on_collection_finished(
        &mut self,
        items: &[TestItemSummary],
    ) -> Result<(), WriteEventError> {
        debug!("rendering {} collected tests", items.len());

        // Collected items are diffed against each other, independently of anything rendered
        // from completed tests.
        let mut prev = None;
        for item in items {
            let current = SpecItem::new(item, &self.prefixes);
            write_item(prev.as_ref(), &current, None, &self.opts, &mut self.writer)?;
            prev = Some(current);
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
            write_summary(stats, collect_only, &self.opts.styles, &mut self.writer)?;
        }
        self.writer.finish_line()?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
struct FormatOptions {
    styles: Styles,
    verbose: bool,
}

/// Writes the headers that changed since `prev`, then the line for `current` itself.
fn write_item(
    prev: Option<&SpecItem>,
    current: &SpecItem,
    outcome: Option<TestOutcome>,
    opts: &FormatOptions,
    writer: &mut LineWriter<'_>,
) -> io::Result<()> {
    let prev_chain = prev.map_or(&[][..], |prev| prev.chain());
    // An unknown group never matches, so it always gets a separator.
    let is_new_group = match (prev.and_then(|prev| prev.group()), current.group()) {
        (Some(prev_group), Some(group)) => prev_group != group,
        _ => true,
    };

    let mut describe_depth = 0;
    let mut context_depth = 0;
    let mut diverged = false;
    for (index, annotation) in current.chain().iter().enumerate() {
        let kind_depth = match annotation.kind {
            AnnotationKind::Describe => {
                describe_depth += 1;
                describe_depth
            }
            AnnotationKind::Context => {
                context_depth += 1;
                context_depth
            }
        };

        // Once a group differs, everything nested under it is new too.
        if prev_chain.get(index) != Some(annotation) {
            diverged = true;
        }
        if diverged {
            write_header(annotation, index + 1, kind_depth, writer)?;
        }
    }

    let depth = current.chain().len();
    if (depth < prev_chain.len() && !diverged) || (depth == 0 && is_new_group) {
        writer.write_separator()?;
    }

    let line = format_result(current, outcome, opts);
    writer.write_line(&format!("{}{line}", INDENT.repeat(depth)))
}

fn write_header(
    annotation: &Annotation,
    depth: usize,
    kind_depth: usize,
    writer: &mut LineWriter<'_>,
) -> io::Result<()> {
    let header = match annotation.kind {
        AnnotationKind::Describe => format!("- Describe: {}...", capitalize(&annotation.label)),
        AnnotationKind::Context if kind_depth > 1 => {
            format!("- ...{}...", uncapitalize(&annotation.label))
        }
        AnnotationKind::Context => format!("- Context: {}...", capitalize(&annotation.label)),
    };

    if depth <= MAX_SEPARATED_DEPTH {
        writer.write_separator()?;
    }
    writer.write_line(&format!(
        "{}{header}",
        INDENT.repeat(depth.saturating_sub(1))
    ))
}

/// Formats the line for a single test, without indentation.
fn format_result(item: &SpecItem, outcome: Option<TestOutcome>, opts: &FormatOptions) -> String {
    let icon = match outcome {
        Some(TestOutcome::Passed) => "- ✓",
        Some(TestOutcome::Failed) => "- F",
        Some(TestOutcome::Skipped) => "- s",
        None => "-",
    };
    let prefix = if item.leaf().has_explicit_it {
        " It:"
    } else {
        ""
    };

    let mut body = String::new();
    if opts.verbose {
        swrite!(body, "{}::{} - ", item.display_path(), item.name());
    }
    body.push_str(&item.leaf().text);
    if let Some(suffix) = item.param_suffix() {
        swrite!(body, " - [{suffix}");
    }

    let status = format!("{icon}{prefix}");
    format!("{} {body}", status.style(opts.styles.outcome(outcome)))
}
