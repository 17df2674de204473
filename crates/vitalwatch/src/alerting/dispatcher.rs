//! Fan-out dispatch of alert events to the attached sinks.

use std::sync::Arc;

use crate::domain::AlertEvent;

use super::sink::AlertSink;

/// Configuration for alert dispatch.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Honor repeat enrichments by scheduling re-emissions.
    pub repeats_enabled: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            repeats_enabled: true,
        }
    }
}

/// Dispatches alert events to every attached sink.
///
/// Sink failures are logged and swallowed; evaluation never observes
/// them. A repeat enrichment on an event is executed as a scheduled
/// re-emission task, so the dispatching caller is never blocked on the
/// repeat interval.
pub struct AlertDispatcher {
    config: DispatchConfig,
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl AlertDispatcher {
    /// Create a dispatcher with no sinks attached.
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            sinks: Vec::new(),
        }
    }

    /// Attach a sink. Multiple sinks fan out in attachment order.
    pub fn add_sink(&mut self, sink: Arc<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    /// Number of attached sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Dispatch one alert event to every sink.
    pub async fn dispatch(&self, event: &AlertEvent) {
        tracing::info!(
            subject = %event.subject_id,
            kind = %event.kind,
            condition = %event.condition,
            "dispatching alert"
        );

        emit_to_all(&self.sinks, event).await;

        if self.config.repeats_enabled {
            if let Some((count, interval_ms)) = event.repeat() {
                let sinks = self.sinks.clone();
                let event = event.clone();
                tokio::spawn(async move {
                    for _ in 0..count {
                        tokio::time::sleep(std::time::Duration::from_millis(interval_ms)).await;
                        emit_to_all(&sinks, &event).await;
                    }
                });
            }
        }
    }

    /// Dispatch a batch of events in order.
    pub async fn dispatch_all(&self, events: &[AlertEvent]) {
        for event in events {
            self.dispatch(event).await;
        }
    }
}

async fn emit_to_all(sinks: &[Arc<dyn AlertSink>], event: &AlertEvent) {
    for sink in sinks {
        if let Err(error) = sink.emit(event).await {
            tracing::warn!(
                sink = sink.name(),
                subject = %event.subject_id,
                %error,
                "alert sink failed"
            );
        }
    }
}
