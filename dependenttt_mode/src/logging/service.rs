//! Logging service and logger back-ends
//!
//! The service owns the level filter; back-ends only write what reaches
//! them.

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Back-ends chosen from the runtime logging preferences.
    ///
    /// With console output and forwarding both off, events are dropped.
    pub fn from_preferences() -> Self {
        let mut targets = MultiLogger::new();

        if config::console_enabled() {
            if config::structured_output() {
                targets.add_logger(Arc::new(StructuredLogger));
            } else {
                targets.add_logger(Arc::new(ConsoleLogger));
            }
        }

        #[cfg(feature = "log-bridge")]
        if config::forward_to_log() {
            targets.add_logger(Arc::new(LogFacadeLogger::new("dependenttt_mode")));
        }

        Self::new(Arc::new(targets), config::min_level())
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Human-readable lines on stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event);
    }
}

/// One JSON object per line on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(line) => eprintln!("{}", line),
            Err(_) => eprintln!("{}", event),
        }
    }
}

/// Hands events to the `log` facade so the embedding program's logger decides the output
#[cfg(feature = "log-bridge")]
pub struct LogFacadeLogger {
    target: &'static str,
}

#[cfg(feature = "log-bridge")]
impl LogFacadeLogger {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    fn level_for(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

#[cfg(feature = "log-bridge")]
impl Logger for LogFacadeLogger {
    fn log(&self, event: &LogEvent) {
        log::log!(target: self.target, Self::level_for(event.level), "{}", event);
    }
}

/// Keeps the most recent events in memory, up to the compile-time buffer size
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|event| event.code == code)
            .cloned()
            .collect()
    }

    pub fn contains(&self, level: LogLevel, code: Code) -> bool {
        self.lock()
            .iter()
            .any(|event| event.level == level && event.code == code)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let capacity = config::buffer_size();
        let mut events = self.lock();
        while events.len() >= capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

/// Fans each event out to every attached logger
#[derive(Default)]
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl MultiLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        for logger in &self.loggers {
            logger.log(event);
        }
    }
}
