//! Output sinks: the byte streams formatted records are written to.
//!
//! A [`Sink`] is cheap to clone and every clone writes to the same stream.
//! Each record is written with a single `write_all` under a mutex, so records
//! from concurrent callers never interleave.

use crate::error::LoggerError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared destination for formatted log output.
#[derive(Clone)]
pub struct Sink {
    name: Arc<str>,
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    /// Wrap any writer.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::named("writer", writer)
    }

    fn named<W: Write + Send + 'static>(name: &str, writer: W) -> Self {
        Self {
            name: Arc::from(name),
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Standard output (the default sink).
    pub fn stdout() -> Self {
        Self::named("stdout", io::stdout())
    }

    /// Standard error.
    pub fn stderr() -> Self {
        Self::named("stderr", io::stderr())
    }

    /// Open `path` for appending, creating it if absent.
    pub fn append_file(path: &Path) -> Result<Self, LoggerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggerError::OpenLogFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::named(&path.display().to_string(), file))
    }

    /// Short description of the destination (`stdout`, a file path, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write one fully formatted record.
    pub fn write_record(&self, bytes: &[u8]) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("log sink mutex poisoned"))?;
        out.write_all(bytes)?;
        out.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("name", &self.name).finish()
    }
}

/// In-memory writer whose clones share one buffer.
///
/// Handy for capturing log output in tests:
///
/// ```
/// use fieldlog::{fields, Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let log = Logger::builder().output(buffer.clone()).build();
/// log.info("hello", &fields!["app", "demo"]);
/// assert!(buffer.contents().contains("\"app\":\"demo\""));
/// ```
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Written output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Each written line parsed as JSON; lines that are not JSON are skipped.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("len", &self.lock().len())
            .finish()
    }
}
