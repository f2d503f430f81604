// Logging module - subscriber setup and in-memory capture for the terminal view
//
// In TUI mode, log events go to a bounded in-memory buffer that the log panel
// renders; writing them to stdout would garble the alternate screen. Headless
// mode logs to stdout. Either mode can add a JSON file layer with rotation.

use crate::config::Config;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 500;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    /// Add a log entry, dropping the oldest when full
    pub fn add(&self, entry: LogEntry) {
        // A poisoned buffer only means a panic mid-push; the data is still usable
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The most recent `n` entries, oldest first
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that captures events into a `LogBuffer`
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = LogLevel::from(event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.add(LogEntry {
            timestamp: Local::now(),
            level,
            message: visitor.finish(),
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Filtering happens at the subscriber level
        true
    }
}

/// Collects the message and any structured fields as `key=value` pairs
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.push_field(field.name(), &rendered);
        }
    }
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: &str) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

/// Install the global tracing subscriber
///
/// Precedence for the filter: RUST_LOG env var > config level > "info".
/// The returned guard must live until exit so the file writer flushes.
pub fn init(config: &Config, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(
                    config.logging.file_rotation.rotation(),
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                );
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if config.enable_tui {
        registry.with(TuiLogLayer::new(log_buffer.clone())).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Info,
            message: message.to_string(),
        }
    }

    #[test]
    fn buffer_drops_oldest_when_full() {
        let buffer = LogBuffer::new();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            buffer.add(entry(&format!("line {i}")));
        }
        assert_eq!(buffer.len(), MAX_LOG_ENTRIES);
        assert_eq!(buffer.recent(1)[0].message, format!("line {}", MAX_LOG_ENTRIES + 4));
        assert_eq!(buffer.recent(MAX_LOG_ENTRIES)[0].message, "line 5");
    }

    #[test]
    fn recent_returns_oldest_first() {
        let buffer = LogBuffer::new();
        buffer.add(entry("a"));
        buffer.add(entry("b"));
        buffer.add(entry("c"));
        let recent: Vec<_> = buffer.recent(2).into_iter().map(|e| e.message).collect();
        assert_eq!(recent, vec!["b", "c"]);
    }

    #[test]
    fn layer_captures_message_and_fields() {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(id = "2B033", "Locality selected");
        });

        let entries = buffer.recent(10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "Locality selected id=2B033");
    }
}
