//! The engine handle: the per-instance state a logger emits through.
//!
//! An [`Engine`] bundles the minimum level, the output pipeline and the fields
//! attached via `with_fields`. It is an immutable value; every transition
//! produces a new handle, so clones held by children or by a [`Context`]
//! never observe later changes on the originating logger.
//!
//! [`Context`]: crate::Context

use crate::fields::Fields;
use crate::record::Record;
use crate::types::{Level, LogFormat};
use crate::writer::RecordWriter;
use chrono::Local;
use std::fmt;
use std::sync::Arc;

/// Underlying engine handle wrapped by a [`Logger`](crate::Logger).
#[derive(Clone)]
pub struct Engine {
    level: Level,
    writer: Arc<dyn RecordWriter>,
    fields: Arc<Fields>,
}

impl Engine {
    pub(crate) fn new(level: Level, writer: Arc<dyn RecordWriter>) -> Self {
        Self {
            level,
            writer,
            fields: Arc::new(Fields::new()),
        }
    }

    /// Current minimum level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Format of the output pipeline.
    pub fn format(&self) -> LogFormat {
        self.writer.format()
    }

    /// Fields attached to every record this handle emits.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub(crate) fn with_level(&self, level: Level) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    pub(crate) fn with_writer(&self, writer: Arc<dyn RecordWriter>) -> Self {
        Self {
            writer,
            ..self.clone()
        }
    }

    pub(crate) fn with_fields(&self, fields: Fields) -> Self {
        let mut merged = (*self.fields).clone();
        merged.extend(fields);
        Self {
            fields: Arc::new(merged),
            ..self.clone()
        }
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        self.level.permits(level)
    }

    /// Build and write one record if the level permits it.
    pub(crate) fn emit(&self, level: Level, error: Option<String>, message: &str, fields: Fields) {
        if !self.enabled(level) {
            return;
        }

        let mut merged = (*self.fields).clone();
        merged.extend(fields);

        let record = Record {
            time: Local::now(),
            level,
            message,
            error,
            fields: merged,
        };

        // Write failures go to stderr; the record is dropped.
        if let Err(e) = self.writer.write_record(&record) {
            eprintln!("fieldlog: could not write record: {e}");
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("level", &self.level)
            .field("format", &self.writer.format())
            .field("fields", &self.fields)
            .finish()
    }
}
