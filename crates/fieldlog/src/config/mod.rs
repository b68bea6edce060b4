//! Configuration resolution for a logger.
//!
//! Settings are layered in increasing priority: built-in defaults, the
//! environment ([`Env`]), then explicit [`Options`] supplied by the caller.
//! The merged level and format strings are validated last, producing an
//! immutable [`Config`] snapshot.

mod env;
mod settings;

pub use env::{Env, LOG_FILE, LOG_FORMAT, LOG_LEVEL, NO_COLOR};
pub use settings::Settings;

use crate::error::LoggerError;
use crate::record::TIME_FORMAT_RFC3339;
use crate::sink::Sink;
use crate::types::{Level, LogFormat};
use std::path::PathBuf;

/// Default minimum level.
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Default output format.
pub const DEFAULT_FORMAT: LogFormat = LogFormat::Json;

/// Where output goes when set explicitly.
#[derive(Debug, Clone)]
pub enum Output {
    /// An already constructed sink
    Sink(Sink),
    /// A file opened for appending at resolution time
    File(PathBuf),
}

/// Explicit caller options. Each setter overrides any earlier value.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub level: Option<String>,
    pub format: Option<String>,
    pub time_format: Option<String>,
    pub output: Option<Output>,
}

/// Resolved configuration snapshot.
///
/// Shared between a logger and the loggers derived from it. Only
/// [`Logger::set_log_format`](crate::Logger::set_log_format) replaces it, and
/// only on the instance it is called on.
#[derive(Debug, Clone)]
pub struct Config {
    level: Level,
    format: LogFormat,
    time_format: String,
    sink: Sink,
    no_color: bool,
}

impl Config {
    /// Merge defaults, `env` and `options`, then validate.
    ///
    /// A `LOG_FILE` in `env` is opened even when `options` replace the output.
    pub fn resolve(env: &Env, options: &Options) -> Result<Self, LoggerError> {
        let mut level = DEFAULT_LEVEL.as_str().to_string();
        let mut format = DEFAULT_FORMAT.as_str().to_string();
        let mut time_format = TIME_FORMAT_RFC3339.to_string();
        let mut sink = Sink::stdout();

        if let Some(env_level) = &env.level {
            level = env_level.clone();
        }
        if let Some(env_format) = &env.format {
            format = env_format.clone();
        }
        if let Some(path) = &env.file {
            sink = Sink::append_file(path)?;
        }

        if let Some(opt_level) = &options.level {
            level = opt_level.clone();
        }
        if let Some(opt_format) = &options.format {
            format = opt_format.clone();
        }
        if let Some(opt_time_format) = &options.time_format {
            time_format = opt_time_format.clone();
        }
        match &options.output {
            Some(Output::Sink(out)) => sink = out.clone(),
            Some(Output::File(path)) => sink = Sink::append_file(path)?,
            None => {}
        }

        Ok(Self {
            level: level.parse()?,
            format: format.parse()?,
            time_format,
            sink,
            no_color: env.no_color,
        })
    }

    /// Minimum level at construction.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Output format recorded for the owning logger.
    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub(crate) fn with_format(&self, format: LogFormat) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Whether console output is written without ANSI colors.
    pub fn no_color(&self) -> bool {
        self.no_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(level: Option<&str>, format: Option<&str>) -> Env {
        Env {
            level: level.map(str::to_string),
            format: format.map(str::to_string),
            ..Env::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(&Env::default(), &Options::default()).unwrap();
        assert_eq!(config.level(), Level::Info);
        assert_eq!(config.format(), LogFormat::Json);
        assert_eq!(config.time_format(), TIME_FORMAT_RFC3339);
        assert_eq!(config.sink().name(), "stdout");
        assert!(!config.no_color());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config =
            Config::resolve(&env_with(Some("WARN"), Some("console")), &Options::default()).unwrap();
        assert_eq!(config.level(), Level::Warn);
        assert_eq!(config.format(), LogFormat::Console);
    }

    #[test]
    fn test_options_override_env() {
        let options = Options {
            level: Some("trace".into()),
            format: Some("json".into()),
            ..Options::default()
        };
        let config = Config::resolve(&env_with(Some("error"), Some("console")), &options).unwrap();
        assert_eq!(config.level(), Level::Trace);
        assert_eq!(config.format(), LogFormat::Json);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = Config::resolve(&env_with(Some("loud"), None), &Options::default()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLogLevel(_)));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let options = Options {
            format: Some("xml".into()),
            ..Options::default()
        };
        let err = Config::resolve(&Env::default(), &options).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLogFormat(_)));
    }

    #[test]
    fn test_env_file_becomes_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let env = Env {
            file: Some(path.clone()),
            ..Env::default()
        };
        let config = Config::resolve(&env, &Options::default()).unwrap();
        assert_eq!(config.sink().name(), path.display().to_string());
        assert!(path.exists());
    }

    #[test]
    fn test_env_file_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let env = Env {
            file: Some(dir.path().join("no").join("such").join("out.log")),
            ..Env::default()
        };
        let err = Config::resolve(&env, &Options::default()).unwrap_err();
        assert!(matches!(err, LoggerError::OpenLogFile { .. }));
    }
}
