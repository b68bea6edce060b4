//! JSON lines encoding.

use super::RecordWriter;
use crate::record::{format_time, Record};
use crate::sink::Sink;
use crate::types::LogFormat;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io;

/// Writes one self-contained JSON object per record.
///
/// Key order: `level`, `time`, `error` (when present), fields sorted by key,
/// `message`. Fields that would repeat one of the built-in keys are dropped.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    sink: Sink,
    time_format: String,
}

impl JsonWriter {
    pub fn new(sink: Sink, time_format: &str) -> Self {
        Self {
            sink,
            time_format: time_format.to_string(),
        }
    }

    /// Encode a record without writing it.
    pub fn encode(&self, record: &Record<'_>) -> serde_json::Result<Vec<u8>> {
        let time = format_time(&record.time, &self.time_format);
        let mut line = serde_json::to_vec(&JsonRecord {
            record,
            time: &time,
        })?;
        line.push(b'\n');
        Ok(line)
    }
}

impl RecordWriter for JsonWriter {
    fn write_record(&self, record: &Record<'_>) -> io::Result<()> {
        let line = self.encode(record).map_err(io::Error::other)?;
        self.sink.write_record(&line)
    }

    fn format(&self) -> LogFormat {
        LogFormat::Json
    }
}

struct JsonRecord<'r, 'a> {
    record: &'r Record<'a>,
    time: &'r str,
}

impl Serialize for JsonRecord<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.record;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("level", record.level.as_str())?;
        map.serialize_entry("time", self.time)?;
        if let Some(error) = &record.error {
            map.serialize_entry("error", error)?;
        }
        for (key, value) in &record.fields {
            if is_reserved(key, record.error.is_some()) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("message", record.message)?;
        map.end()
    }
}

fn is_reserved(key: &str, has_error: bool) -> bool {
    match key {
        "level" | "time" | "message" => true,
        "error" => has_error,
        _ => false,
    }
}
