//! Builder for constructing a [`Logger`].

use crate::config::{Config, Env, Options, Output, Settings};
use crate::error::LoggerError;
use crate::logger::Logger;
use crate::sink::Sink;
use std::io::Write;
use std::path::PathBuf;

/// Collects explicit options, then resolves them against the environment.
///
/// Options override environment variables; a later call to the same setter
/// overrides an earlier one.
///
/// ```
/// use fieldlog::{Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let log = Logger::builder()
///     .level("debug")
///     .format("console")
///     .time_format("%H:%M:%S")
///     .output(buffer.clone())
///     .build();
/// log.debug("ready", &[]);
/// assert!(buffer.contents().contains("DBG"));
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    options: Options,
    env: Option<Env>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial minimum level (validated at build time).
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.options.level = Some(level.into());
        self
    }

    /// Initial output format, `json` or `console` (validated at build time).
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.options.format = Some(format.into());
        self
    }

    /// strftime-style timestamp format.
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.options.time_format = Some(time_format.into());
        self
    }

    /// Write to any writer.
    pub fn output<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.sink(Sink::new(writer))
    }

    /// Write to an existing sink.
    pub fn sink(mut self, sink: Sink) -> Self {
        self.options.output = Some(Output::Sink(sink));
        self
    }

    /// Append to a file, created if absent.
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = Some(Output::File(path.into()));
        self
    }

    /// Apply every key present in a `[logging]` settings section.
    pub fn settings(mut self, settings: &Settings) -> Self {
        if let Some(level) = &settings.level {
            self = self.level(level.clone());
        }
        if let Some(format) = &settings.format {
            self = self.format(format.clone());
        }
        if let Some(time_format) = &settings.time_format {
            self = self.time_format(time_format.clone());
        }
        if let Some(path) = settings.file_path() {
            self = self.output_file(path);
        }
        self
    }

    /// Use `env` instead of reading the process environment.
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    /// Build the logger, returning resolution failures.
    pub fn try_build(self) -> Result<Logger, LoggerError> {
        let env = self.env.unwrap_or_else(Env::from_process);
        let config = Config::resolve(&env, &self.options)?;
        Logger::from_config(config)
    }

    /// Build the logger.
    ///
    /// # Panics
    ///
    /// Panics if the level or format is invalid or the log file cannot be
    /// opened. A process must not run with an unusable logger.
    pub fn build(self) -> Logger {
        match self.try_build() {
            Ok(logger) => logger,
            Err(e) => panic!("failed to initialize logger: {e}"),
        }
    }
}
