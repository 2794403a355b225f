//! In-memory trace log
//!
//! Installed as the `log` backend. Every record is mirrored to the browser
//! console and kept in a bounded ring so the session can be downloaded as
//! JSON from the dashboard footer.

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{SecondsFormat, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;

use super::download::trigger_download;

const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    /// Module path of the call site
    pub category: String,
    pub message: String,
}

struct LogTrace {
    logs: VecDeque<LogEntry>,
}

impl LogTrace {
    fn new() -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    fn push(&mut self, entry: LogEntry) {
        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.logs).unwrap_or_else(|_| "[]".to_string())
    }
}

thread_local! {
    static LOG_TRACE: RefCell<LogTrace> = RefCell::new(LogTrace::new());
}

struct TraceLogger;

impl Log for TraceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let category = record.target().to_string();
        let message = record.args().to_string();
        let line = format!("[{}] {}", category, message);
        match record.level() {
            Level::Error => web_sys::console::error_1(&line.into()),
            Level::Warn => web_sys::console::warn_1(&line.into()),
            _ => web_sys::console::log_1(&line.into()),
        }

        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level: record.level().as_str().to_lowercase(),
            category,
            message,
        };
        LOG_TRACE.with(|trace| trace.borrow_mut().push(entry));
    }

    fn flush(&self) {}
}

static LOGGER: TraceLogger = TraceLogger;

/// Install the trace logger. Safe to call more than once.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().to_json())
}

/// Save the collected trace as `log_trace_<timestamp>.json`.
pub fn download_logs() {
    let json = get_logs_json();
    let timestamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    let filename = format!("log_trace_{}.json", timestamp);

    if let Err(e) = trigger_download(&filename, "application/json", json.as_bytes()) {
        log::error!("log download failed: {}", e);
    }
}
