//! Console output surface.

use chrono::Local;
use std::io::{self, Write};

/// Writes text payloads to a sink, optionally stamping each line with the local time.
pub struct OutputChannel<W: Write> {
    sink: W,
    timestamps: bool,
}

impl<W: Write> OutputChannel<W> {
    pub fn new(sink: W, timestamps: bool) -> Self {
        Self { sink, timestamps }
    }

    /// Show one payload. Empty payloads write nothing.
    pub fn show(&mut self, payload: &str) -> io::Result<()> {
        if payload.is_empty() {
            return Ok(());
        }
        self.show_lines(payload.split('\n'))
    }

    /// Show each line as given, empty lines included.
    pub fn show_lines<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> io::Result<()> {
        for line in lines {
            if self.timestamps {
                writeln!(self.sink, "{}: {}", Local::now().format("%H:%M:%S"), line)?;
            } else {
                writeln!(self.sink, "{}", line)?;
            }
        }
        self.sink.flush()
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
