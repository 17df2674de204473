//! Alert sinks: consumers of emitted alert events.

use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;

use crate::domain::AlertEvent;
use crate::VitalError;

/// Receives emitted alert events.
///
/// Sinks are one-way: a failing sink is logged by the dispatcher and
/// never rolls back or aborts evaluation.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Sink name, used in log events.
    fn name(&self) -> &str;

    /// Consume one alert event.
    async fn emit(&self, event: &AlertEvent) -> Result<(), VitalError>;
}

/// Default sink: structured logging through `tracing`.
pub struct TracingSink;

#[async_trait]
impl AlertSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn emit(&self, event: &AlertEvent) -> Result<(), VitalError> {
        tracing::info!(
            subject = %event.subject_id,
            kind = %event.kind,
            condition = %event.condition,
            detected_at_ms = event.detected_at_ms,
            priority = ?event.priority(),
            "alert"
        );
        Ok(())
    }
}

/// Echoes alerts to stdout.
pub struct ConsoleSink;

#[async_trait]
impl AlertSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn emit(&self, event: &AlertEvent) -> Result<(), VitalError> {
        match event.priority() {
            Some(priority) => println!("{priority} {event}"),
            None => println!("{event}"),
        }
        Ok(())
    }
}

/// Appends alerts to a file as JSON lines.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a file sink writing to `path`. The file is created on
    /// first emission.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AlertSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn emit(&self, event: &AlertEvent) -> Result<(), VitalError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

/// Collects alerts in memory. Intended for tests and embedding hosts
/// that inspect alerts programmatically.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<AlertEvent>>,
}

impl MemorySink {
    /// Create an empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far, in arrival order.
    pub fn events(&self) -> Vec<AlertEvent> {
        self.events.lock().clone()
    }

    /// Number of events received.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events were received.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[async_trait]
impl AlertSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn emit(&self, event: &AlertEvent) -> Result<(), VitalError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlertKind, SubjectId};

    fn make_alert() -> AlertEvent {
        AlertEvent::new(AlertKind::Oxygen, SubjectId::new(1), "Rapid Saturation Drop", 1000)
    }

    #[tokio::test]
    async fn memory_sink_records_events() {
        let sink = MemorySink::new();
        sink.emit(&make_alert()).await.unwrap();
        sink.emit(&make_alert()).await.unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.events()[0].condition, "Rapid Saturation Drop");
    }

    #[tokio::test]
    async fn file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.jsonl");
        let sink = FileSink::new(&path);

        sink.emit(&make_alert()).await.unwrap();
        sink.emit(&make_alert()).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: AlertEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.subject_id, "1");
    }

    #[tokio::test]
    async fn tracing_sink_never_fails() {
        assert!(TracingSink.emit(&make_alert()).await.is_ok());
    }
}
