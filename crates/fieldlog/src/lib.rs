//! fieldlog - structured logging facade.
//!
//! Application code logs through a [`Logger`]: leveled emit methods with
//! per-call fields, child loggers carrying attached fields, and propagation
//! through a request-scoped [`Context`]. Output is JSON lines or a
//! human-readable console format, switchable at runtime.
//!
//! # Architecture
//!
//! ```text
//! defaults → env (LOG_LEVEL, LOG_FORMAT, LOG_FILE, NO_COLOR) → builder options
//!     → Config → create_writer(format, sink) → Engine ← Logger
//! ```
//!
//! # Usage
//!
//! ```rust
//! use fieldlog::{fields, Context, Logger, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let mut log = Logger::builder()
//!     .level("debug")
//!     .output(buffer.clone())
//!     .build()
//!     .with_fields(&fields!["app", "example", "version", "1.0.0"]);
//!
//! log.debug("starting", &fields!["workers", 4]);
//!
//! let ctx = log.with_context(&Context::background());
//! log.from_context(&ctx).info("from context", &[]);
//!
//! log.set_log_format("console").unwrap();
//! log.info("now human readable", &[]);
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod fields;
pub mod layer;
pub mod logger;
pub mod record;
pub mod sink;
pub mod types;
pub mod writer;

// Re-exported for the `fields!` macro.
#[doc(hidden)]
pub use serde_json;

pub use builder::LoggerBuilder;
pub use config::{Config, Env, Settings};
pub use context::Context;
pub use engine::Engine;
pub use error::{LoggerError, Result, SettingsError};
pub use fields::{encode_fields, Fields};
pub use layer::FieldlogLayer;
pub use logger::Logger;
pub use record::{Record, TIME_FORMAT_RFC3339, TIME_FORMAT_RFC3339_NANO, TIME_FORMAT_UNIX};
pub use sink::{SharedBuffer, Sink};
pub use types::{Level, LogFormat};
pub use writer::{create_writer, ConsoleWriter, JsonWriter, RecordWriter};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
