//! Failure side channel

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One reported message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
}

/// Receives the messages that explain a `false`/empty operation result.
///
/// Module operations never return errors to the panel; they report here instead.
pub trait Reporter: Send + Sync {
    fn report(&self, severity: Severity, message: &str);

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }

    fn warn(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }
}

/// Forwards every report to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => log::info!("[route53] {message}"),
            Severity::Warning => log::warn!("[route53] {message}"),
            Severity::Error => log::error!("[route53] {message}"),
        }
    }
}

/// Collects reports in memory so the caller can show them after the call.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<Report>>,
}

impl MemoryReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, oldest first.
    pub fn entries(&self) -> Vec<Report> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of one severity.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|r| r.severity == severity)
            .map(|r| r.message)
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Drain all collected reports.
    pub fn take(&self) -> Vec<Report> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Report {
                severity,
                message: message.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reporter_collects_by_severity() {
        let reporter = MemoryReporter::new();
        reporter.warn("zone exists");
        reporter.error("boom");
        reporter.info("done");

        assert_eq!(reporter.errors(), vec!["boom"]);
        assert_eq!(reporter.warnings(), vec!["zone exists"]);
        assert!(reporter.has_errors());

        assert_eq!(reporter.take().len(), 3);
        assert!(reporter.entries().is_empty());
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Report {
            severity: Severity::Warning,
            message: "m".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"severity":"warning","message":"m"}"#);
    }
}
