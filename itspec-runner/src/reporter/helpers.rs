// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::LineWriter;
use crate::{helpers::plural, session::SessionStats};
use itspec_metadata::TestOutcome;
use owo_colors::{OwoColorize, Style};
use std::io;

#[derive(Debug, Default, Clone)]
pub(super) struct Styles {
    pub(super) is_colorized: bool,
    pub(super) count: Style,
    pub(super) pass: Style,
    pub(super) fail: Style,
    pub(super) skip: Style,
    pub(super) pending: Style,
}

impl Styles {
    pub(super) fn colorize(&mut self) {
        self.is_colorized = true;
        self.count = Style::new().bold();
        self.pass = Style::new().bright_green();
        self.fail = Style::new().bright_red();
        self.skip = Style::new().bright_yellow();
        self.pending = Style::new().bright_yellow();
    }

    /// Returns the style for an outcome. Collected-but-unrun tests have no outcome.
    pub(super) fn outcome(&self, outcome: Option<TestOutcome>) -> Style {
        match outcome {
            Some(TestOutcome::Passed) => self.pass,
            Some(TestOutcome::Failed) => self.fail,
            Some(TestOutcome::Skipped) => self.skip,
            None => self.pending,
        }
    }
}

/// Writes the line summarizing a session, preceded by a separator.
pub(super) fn write_summary(
    stats: &SessionStats,
    collect_only: bool,
    styles: &Styles,
    writer: &mut LineWriter<'_>,
) -> io::Result<()> {
    writer.finish_line()?;
    writer.write_separator()?;

    if collect_only {
        let line = format!(
            "{} {} collected",
            stats.collected.style(styles.count),
            plural::tests_str(stats.collected),
        );
        return writer.write_line(&line);
    }

    let parts: Vec<String> = [
        (stats.passed, "passed", styles.pass),
        (stats.failed, "failed", styles.fail),
        (stats.skipped, "skipped", styles.skip),
        (stats.errors, plural::errors_str(stats.errors), styles.fail),
    ]
    .into_iter()
    .filter(|(count, _, _)| *count > 0)
    .map(|(count, word, style)| format!("{} {}", count.style(styles.count), word.style(style)))
    .collect();

    if parts.is_empty() {
        writer.write_line("no tests ran")
    } else {
        writer.write_line(&parts.join(", "))
    }
}
