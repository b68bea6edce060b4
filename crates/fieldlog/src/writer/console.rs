//! Human-readable console encoding.

use super::RecordWriter;
use crate::record::{format_time, Record};
use crate::sink::Sink;
use crate::types::{Level, LogFormat};
use console::Style;
use serde_json::Value;
use std::fmt::Display;
use std::io;

/// Writes one line per record:
/// `<time> <LVL> <message> error=<err> <key>=<value> ...`
#[derive(Debug, Clone)]
pub struct ConsoleWriter {
    sink: Sink,
    time_format: String,
    no_color: bool,
}

impl ConsoleWriter {
    pub fn new(sink: Sink, time_format: &str, no_color: bool) -> Self {
        Self {
            sink,
            time_format: time_format.to_string(),
            no_color,
        }
    }

    /// Render a record without writing it.
    pub fn render(&self, record: &Record<'_>) -> String {
        let mut parts = Vec::with_capacity(record.fields.len() + 4);

        parts.push(self.paint(
            Style::new().black().bright(),
            format_time(&record.time, &self.time_format),
        ));
        parts.push(self.paint(level_style(record.level), record.level.tag()));
        if !record.message.is_empty() {
            parts.push(record.message.to_string());
        }
        if let Some(error) = &record.error {
            parts.push(format!(
                "{}{}",
                self.paint(Style::new().red(), "error="),
                self.paint(Style::new().red().bold(), quote_if_needed(error)),
            ));
        }
        for (key, value) in &record.fields {
            parts.push(format!(
                "{}{}",
                self.paint(Style::new().cyan(), format!("{}=", quote_if_needed(key))),
                render_value(value),
            ));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        line
    }

    fn paint(&self, style: Style, text: impl Display) -> String {
        if self.no_color {
            text.to_string()
        } else {
            style.force_styling(true).apply_to(text).to_string()
        }
    }
}

impl RecordWriter for ConsoleWriter {
    fn write_record(&self, record: &Record<'_>) -> io::Result<()> {
        self.sink.write_record(self.render(record).as_bytes())
    }

    fn format(&self) -> LogFormat {
        LogFormat::Console
    }
}

fn level_style(level: Level) -> Style {
    match level {
        Level::Trace => Style::new().magenta(),
        Level::Debug => Style::new().yellow(),
        Level::Info => Style::new().green(),
        Level::Warn => Style::new().red(),
        Level::Error | Level::Fatal | Level::Panic => Style::new().red().bold(),
        Level::No | Level::Disabled => Style::new(),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote_if_needed(s),
        other => other.to_string(),
    }
}

/// Keys and strings are bare unless they would be ambiguous on a `key=value` line.
fn quote_if_needed(s: &str) -> String {
    let needs_quote = s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\\' | '='));
    if needs_quote {
        Value::String(s.to_string()).to_string()
    } else {
        s.to_string()
    }
}
