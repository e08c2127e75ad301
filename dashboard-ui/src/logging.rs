//! Console Logging
//!
//! Routes `tracing` events from the dashboard crate to the browser console.

use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

/// Buffers one formatted event and hands it to `console.log` on flush
pub struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer);
            web_sys::console::log_1(&line.trim_end().into());
            self.buffer.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buffer: Vec::new() }
    }
}

/// Parse a configured level, falling back to INFO
fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Install the console subscriber
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init(level: &str) {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(ConsoleMakeWriter),
        )
        .with(level_filter(level))
        .try_init();

    if result.is_err() {
        web_sys::console::warn_1(&"Logging already initialized".into());
    }
}
