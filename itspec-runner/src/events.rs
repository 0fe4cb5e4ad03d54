// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading session events from a host runner.
//!
//! Events are serialized as JSON lines: one [`SessionEventSummary`] per line. Blank lines are
//! ignored.

use crate::errors::EventStreamParseError;
use itspec_metadata::SessionEventSummary;
use std::io::BufRead;

/// An iterator over the session events in a JSON-lines stream.
#[derive(Debug)]
pub struct EventStream<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl<R: BufRead> EventStream<R> {
    /// Creates a new event stream over the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for EventStream<R> {
    type Item = Result<SessionEventSummary, EventStreamParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(error) => return Some(Err(EventStreamParseError::Read(error))),
            }
            self.line_number += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            return Some(serde_json::from_str(line).map_err(|error| {
                EventStreamParseError::InvalidEvent {
                    line_number: self.line_number,
                    error,
                }
            }));
        }
    }
}
