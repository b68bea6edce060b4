//! Writer selection: turns a format name and a sink into an output pipeline.

mod console;
mod json;

pub use console::ConsoleWriter;
pub use json::JsonWriter;

use crate::error::LoggerError;
use crate::record::Record;
use crate::sink::Sink;
use crate::types::LogFormat;
use std::io;
use std::sync::Arc;

/// Encodes records and writes them to a sink.
pub trait RecordWriter: Send + Sync {
    /// Encode and write one record.
    fn write_record(&self, record: &Record<'_>) -> io::Result<()>;

    /// The format this writer produces.
    fn format(&self) -> LogFormat;
}

/// Build the writer for `format` (case-insensitive).
///
/// * `json` writes records straight to `sink` as JSON lines.
/// * `console` wraps `sink` in a human-readable formatter using
///   `time_format`; `no_color` disables ANSI styling.
///
/// Any other format fails with [`LoggerError::InvalidLogFormat`].
pub fn create_writer(
    format: &str,
    sink: &Sink,
    time_format: &str,
    no_color: bool,
) -> Result<Arc<dyn RecordWriter>, LoggerError> {
    let writer: Arc<dyn RecordWriter> = match format.parse::<LogFormat>()? {
        LogFormat::Json => Arc::new(JsonWriter::new(sink.clone(), time_format)),
        LogFormat::Console => Arc::new(ConsoleWriter::new(sink.clone(), time_format, no_color)),
    };
    Ok(writer)
}
