//! Global logging for the dependenttt mode
//!
//! One `LoggingService` is installed per process. Events logged through the
//! macros pick up the file being processed on the current thread.

#[macro_use]
pub mod macros;

pub mod codes;
pub mod config;
pub mod events;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::OnceLock;

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

#[cfg(feature = "log-bridge")]
pub use service::LogFacadeLogger;

static SERVICE: OnceLock<LoggingService> = OnceLock::new();

thread_local! {
    static CURRENT_FILE: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

/// File currently being highlighted on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

impl FileContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self { file_path, file_id }
    }
}

/// Validate the compiled limits and install the service built from the
/// logging preferences. Fails if a service is already installed.
pub fn init_global_logging() -> Result<(), String> {
    config::validate().map_err(|e| format!("invalid logging limits: {}", e))?;

    if SERVICE.set(LoggingService::from_preferences()).is_err() {
        emit(
            LogEvent::error(
                codes::system::INITIALIZATION_FAILURE,
                "Global logging initialized more than once",
            ),
            &[],
        );
        return Err("global logging is already initialized".to_string());
    }

    emit(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        ),
        &[],
    );
    Ok(())
}

pub fn global_service() -> Option<&'static LoggingService> {
    SERVICE.get()
}

/// Restores the previous file context when dropped, so nested and
/// panicking scopes leave the thread as they found it
struct FileScope {
    previous: Option<FileContext>,
}

impl Drop for FileScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_FILE.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Run `f` with `file_path` as this thread's file context
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let context = FileContext::new(file_path, file_id);
    let _scope = FileScope {
        previous: CURRENT_FILE.with(|slot| slot.replace(Some(context))),
    };
    f()
}

pub fn current_file() -> Option<FileContext> {
    CURRENT_FILE.with(|slot| slot.borrow().clone())
}

fn attach_context(mut event: LogEvent, context: &[(&str, String)]) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    if let Some(file) = current_file() {
        event = event
            .with_context("file", &file.file_path.display().to_string())
            .with_context("file_id", &file.file_id.to_string());
    }
    event
}

/// Attach context and the current file, then hand the event to the global
/// service. Does nothing before `init_global_logging`.
pub fn emit(event: LogEvent, context: &[(&str, String)]) {
    if let Some(service) = global_service() {
        service.log_event(attach_context(event, context));
    }
}
