//! The logger facade.
//!
//! A [`Logger`] pairs an [`Engine`] handle with the configuration snapshot it
//! was built from. Emission borrows the logger immutably and is safe from any
//! number of threads; reconfiguration (`set_level`, `set_log_format`) needs
//! `&mut self` and only ever affects the instance it is called on. Loggers
//! derived through [`Logger::with_fields`] or a [`Context`] keep the state
//! they were created with.

use crate::builder::LoggerBuilder;
use crate::config::Config;
use crate::context::Context;
use crate::engine::Engine;
use crate::error::LoggerError;
use crate::fields::{encode_fields, Fields};
use crate::types::{Level, LogFormat};
use crate::writer::create_writer;
use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;

/// Structured, leveled logger.
///
/// Fields are passed as an alternating key/value slice, usually built with
/// the [`fields!`](crate::fields) macro. Malformed pairs are dropped.
#[derive(Debug, Clone)]
pub struct Logger {
    engine: Engine,
    config: Arc<Config>,
}

impl Logger {
    /// Logger configured from defaults and the process environment.
    ///
    /// # Panics
    ///
    /// Panics on an invalid `LOG_LEVEL`/`LOG_FORMAT` or an unopenable
    /// `LOG_FILE`; see [`LoggerBuilder::build`].
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_config(config: Config) -> Result<Self, LoggerError> {
        let writer = create_writer(
            config.format().as_str(),
            config.sink(),
            config.time_format(),
            config.no_color(),
        )?;
        Ok(Self {
            engine: Engine::new(config.level(), writer),
            config: Arc::new(config),
        })
    }

    pub fn trace(&self, msg: &str, fields: &[Value]) {
        self.log(Level::Trace, msg, fields);
    }

    pub fn debug(&self, msg: &str, fields: &[Value]) {
        self.log(Level::Debug, msg, fields);
    }

    pub fn info(&self, msg: &str, fields: &[Value]) {
        self.log(Level::Info, msg, fields);
    }

    pub fn warn(&self, msg: &str, fields: &[Value]) {
        self.log(Level::Warn, msg, fields);
    }

    /// Log at error level with an optional associated error.
    pub fn error(&self, err: Option<&dyn StdError>, msg: &str, fields: &[Value]) {
        self.engine
            .emit(Level::Error, describe(err), msg, encode_fields(fields));
    }

    /// Log at fatal level, then exit the process with status 1.
    ///
    /// The process exits even when the level suppresses the record.
    pub fn fatal(&self, err: Option<&dyn StdError>, msg: &str, fields: &[Value]) -> ! {
        self.engine
            .emit(Level::Fatal, describe(err), msg, encode_fields(fields));
        std::process::exit(1)
    }

    /// Log at panic level, then panic with `msg`.
    ///
    /// The panic happens even when the level suppresses the record.
    pub fn panic(&self, err: Option<&dyn StdError>, msg: &str, fields: &[Value]) -> ! {
        self.engine
            .emit(Level::Panic, describe(err), msg, encode_fields(fields));
        panic!("{msg}")
    }

    /// Log at an arbitrary level without terminating.
    ///
    /// `Fatal` and `Panic` records are written like any other; use
    /// [`Logger::fatal`] or [`Logger::panic`] for the terminating variants.
    pub fn log(&self, level: Level, msg: &str, fields: &[Value]) {
        self.engine.emit(level, None, msg, encode_fields(fields));
    }

    pub(crate) fn log_fields(&self, level: Level, msg: &str, fields: Fields) {
        self.engine.emit(level, None, msg, fields);
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        self.engine.enabled(level)
    }

    /// A new logger whose records also carry `fields`.
    ///
    /// The receiver is unchanged; the new logger shares its configuration.
    pub fn with_fields(&self, fields: &[Value]) -> Logger {
        Logger {
            engine: self.engine.with_fields(encode_fields(fields)),
            config: Arc::clone(&self.config),
        }
    }

    /// A new context with this logger's engine bound to it.
    pub fn with_context(&self, ctx: &Context) -> Context {
        ctx.with_value(self.engine.clone())
    }

    /// The logger bound to `ctx`, or a copy of `self` when `ctx` holds no
    /// usable binding.
    ///
    /// A bound engine whose level is [`Level::Disabled`] counts as unbound.
    pub fn from_context(&self, ctx: &Context) -> Logger {
        match ctx.value::<Engine>() {
            Some(engine) if engine.level() != Level::Disabled => Logger {
                engine: engine.clone(),
                config: Arc::clone(&self.config),
            },
            _ => self.clone(),
        }
    }

    /// Change this instance's minimum level.
    ///
    /// On failure the current level is kept.
    pub fn set_level(&mut self, level: &str) -> Result<(), LoggerError> {
        let level: Level = level.parse()?;
        self.engine = self.engine.with_level(level);
        Ok(())
    }

    /// Switch this instance's output format, rebuilding its writer over the
    /// configured sink.
    ///
    /// The new format is recorded in a fresh snapshot for this instance;
    /// derived loggers keep the one they were created with. On failure the
    /// current format stays active.
    pub fn set_log_format(&mut self, format: &str) -> Result<(), LoggerError> {
        let writer = create_writer(
            format,
            self.config.sink(),
            self.config.time_format(),
            self.config.no_color(),
        )?;
        self.config = Arc::new(self.config.with_format(writer.format()));
        self.engine = self.engine.with_writer(writer);
        Ok(())
    }

    /// Current minimum level.
    pub fn level(&self) -> Level {
        self.engine.level()
    }

    /// Current output format.
    pub fn format(&self) -> LogFormat {
        self.engine.format()
    }

    /// This logger's configuration snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying engine handle.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(err: Option<&dyn StdError>) -> Option<String> {
    err.map(|e| e.to_string())
}
