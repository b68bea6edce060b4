//! Bridge from the `tracing` ecosystem into a [`Logger`].
//!
//! Libraries instrumented with `tracing` can share the application's sink and
//! format by installing [`FieldlogLayer`] in a subscriber:
//!
//! ```
//! use fieldlog::{FieldlogLayer, Logger, SharedBuffer};
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let buffer = SharedBuffer::new();
//! let log = Logger::builder().output(buffer.clone()).build();
//! let subscriber = tracing_subscriber::registry().with(FieldlogLayer::new(log));
//!
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::info!(user = "ada", "signed in");
//! });
//! assert!(buffer.contents().contains("\"user\":\"ada\""));
//! ```

use crate::fields::Fields;
use crate::logger::Logger;
use crate::types::Level;
use serde_json::{json, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context as LayerContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Field name tracing uses for the formatted message.
const MESSAGE_FIELD: &str = "message";

/// `tracing_subscriber` layer that writes events through a [`Logger`].
///
/// Event fields become record fields, the event target is added as `target`.
/// Spans are not recorded.
#[derive(Debug, Clone)]
pub struct FieldlogLayer {
    logger: Logger,
}

impl FieldlogLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Fields,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, json!(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, json!(value));
    }
}

impl<S> Layer<S> for FieldlogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        visitor
            .fields
            .insert("target".to_string(), json!(metadata.target()));

        let message = visitor.message.unwrap_or_default();
        self.logger.log_fields(level, &message, visitor.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Env;
    use crate::sink::SharedBuffer;
    use crate::types::LogFormat;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    fn layer(buffer: &SharedBuffer, level: &str) -> FieldlogLayer {
        let logger = Logger::builder()
            .env(Env::default())
            .level(level)
            .time_format("TS")
            .output(buffer.clone())
            .build();
        FieldlogLayer::new(logger)
    }

    #[test]
    fn test_event_fields_and_message() {
        let buffer = SharedBuffer::new();
        let subscriber = tracing_subscriber::registry().with(layer(&buffer, "trace"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "billing", attempt = 3, ok = false, "charge retried");
        });

        let lines = buffer.json_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], json!("warn"));
        assert_eq!(lines[0]["message"], json!("charge retried"));
        assert_eq!(lines[0]["attempt"], json!(3));
        assert_eq!(lines[0]["ok"], json!(false));
        assert_eq!(lines[0]["target"], json!("billing"));
    }

    #[test]
    fn test_layer_exposes_its_logger() {
        let buffer = SharedBuffer::new();
        let layer = layer(&buffer, "warn");
        assert_eq!(layer.logger().level(), Level::Warn);
        assert_eq!(layer.logger().format(), LogFormat::Json);
    }

    #[test]
    fn test_logger_level_filters_events() {
        let buffer = SharedBuffer::new();
        let subscriber = tracing_subscriber::registry().with(layer(&buffer, "warn"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("dropped");
            tracing::error!("kept");
        });

        let lines = buffer.json_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["message"], json!("kept"));
    }

    #[test]
    fn test_composes_with_env_filter() {
        let buffer = SharedBuffer::new();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("noisy=off,info"))
            .with(layer(&buffer, "trace"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "noisy", "filtered out");
            tracing::info!(target: "app", "passes");
        });

        let lines = buffer.json_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["target"], json!("app"));
    }

    #[test]
    fn test_debug_values_are_strings() {
        let buffer = SharedBuffer::new();
        let subscriber = tracing_subscriber::registry().with(layer(&buffer, "info"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(ids = ?vec![1, 2], "batch");
        });

        assert_eq!(buffer.json_lines()[0]["ids"], json!("[1, 2]"));
    }
}
