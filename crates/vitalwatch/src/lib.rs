//! # VitalWatch
//!
//! A clinical alert evaluation engine: timestamped vital-sign
//! measurements stream in per subject, fixed rule evaluators scan each
//! subject's history, and the alerts they raise fan out to pluggable
//! sinks.
//!
//! ## Features
//!
//! - **Measurement ingestion**: file replay, WebSocket feeds, and a
//!   synthetic generator, all funneled through one parser
//! - **Rule evaluation**: blood pressure, saturation, combined, and
//!   cardiac rule families run in a fixed registry order
//! - **Alert dispatch**: fan-out to console, file, tracing, and
//!   in-memory sinks, with optional scheduled re-emission
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      vitalwatch                       │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌─────────┐   ┌──────────────┐   ┌──────────────┐   │
//! │  │ Ingest  │──▶│ SubjectStore │──▶│  Evaluation  │   │
//! │  └─────────┘   └──────────────┘   └──────┬───────┘   │
//! │                                          │           │
//! │                                  ┌───────▼────────┐  │
//! │                                  │    Alerting    │  │
//! │                                  │  (dispatcher)  │  │
//! │                                  └────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitalwatch::{Monitor, MonitorConfig, SubjectStore};
//! use vitalwatch::ingest::FileReader;
//!
//! #[tokio::main]
//! async fn main() -> vitalwatch::Result<()> {
//!     let store = Arc::new(SubjectStore::new());
//!     FileReader::new("./feed").read_into(&store).await?;
//!
//!     let config = MonitorConfig::builder()
//!         .eval_interval_ms(1000)
//!         .continuous_monitoring(false)
//!         .build();
//!
//!     let monitor = Monitor::new(config, store);
//!     monitor.run().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alerting;
pub mod domain;
pub mod evaluation;
pub mod ingest;

// Re-export main types
pub use domain::{
    AlertEvent, AlertKind, Enrichment, MeasurementKind, MeasurementRecord, PriorityLabel,
    SubjectHistory, SubjectId, SubjectStore,
};

pub use evaluation::{EvaluatorFn, Orchestrator};

pub use alerting::{
    AlertDispatcher, AlertSink, ConsoleSink, DispatchConfig, FileSink, MemorySink, TracingSink,
};

pub use ingest::{FileReader, GeneratorConfig, IngestStats, VitalsGenerator, WebSocketReader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for engine operations
pub type Result<T> = std::result::Result<T, VitalError>;

/// Unified error type for engine operations
#[derive(Debug, thiserror::Error)]
pub enum VitalError {
    /// Malformed input rejected at the ingestion boundary
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Alert sink failure
    #[error("Sink error: {0}")]
    Sink(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket transport error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Configuration for the monitoring loop
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Pause between evaluation sweeps in milliseconds
    pub eval_interval_ms: u64,
    /// Keep sweeping until stopped; a single sweep otherwise
    pub continuous_monitoring: bool,
    /// Restrict evaluation to a fixed `[from, to]` timestamp window
    pub window: Option<(i64, i64)>,
    /// Dispatch configuration
    pub dispatch: DispatchConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            eval_interval_ms: 1000,
            continuous_monitoring: true,
            window: None,
            dispatch: DispatchConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Create a new configuration builder
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }
}

/// Builder for MonitorConfig
#[derive(Debug, Default)]
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    /// Set the evaluation interval, floored at 100 ms
    pub fn eval_interval_ms(mut self, interval: u64) -> Self {
        self.config.eval_interval_ms = interval.max(100);
        self
    }

    /// Enable/disable continuous monitoring
    pub fn continuous_monitoring(mut self, enabled: bool) -> Self {
        self.config.continuous_monitoring = enabled;
        self
    }

    /// Restrict evaluation to a fixed timestamp window
    pub fn window(mut self, from: i64, to: i64) -> Self {
        self.config.window = Some((from, to));
        self
    }

    /// Enable/disable repeat enrichment scheduling
    pub fn repeats_enabled(mut self, enabled: bool) -> Self {
        self.config.dispatch.repeats_enabled = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> MonitorConfig {
        self.config
    }
}

/// Main monitoring coordinator
///
/// Ties a shared [`SubjectStore`] to the evaluator registry and the
/// alert dispatcher. The store is injected so ingestion can run
/// concurrently against the same histories the monitor sweeps.
pub struct Monitor {
    config: MonitorConfig,
    store: std::sync::Arc<SubjectStore>,
    orchestrator: Orchestrator,
    dispatcher: AlertDispatcher,
    running: std::sync::atomic::AtomicBool,
}

impl Monitor {
    /// Create a monitor over an existing store with the standard rule
    /// families and a tracing sink attached.
    pub fn new(config: MonitorConfig, store: std::sync::Arc<SubjectStore>) -> Self {
        let mut dispatcher = AlertDispatcher::new(config.dispatch.clone());
        dispatcher.add_sink(std::sync::Arc::new(TracingSink));

        Self {
            config,
            store,
            orchestrator: Orchestrator::with_default_rules(),
            dispatcher,
            running: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Attach an additional alert sink.
    pub fn add_sink(&mut self, sink: std::sync::Arc<dyn AlertSink>) {
        self.dispatcher.add_sink(sink);
    }

    /// Replace the default rule registry.
    pub fn set_orchestrator(&mut self, orchestrator: Orchestrator) {
        self.orchestrator = orchestrator;
    }

    /// The store this monitor sweeps.
    pub fn store(&self) -> &std::sync::Arc<SubjectStore> {
        &self.store
    }

    /// Evaluate one subject and dispatch whatever fires.
    pub async fn evaluate_subject(&self, subject_id: SubjectId) -> Vec<AlertEvent> {
        let alerts = self
            .orchestrator
            .evaluate_subject(&self.store, subject_id, self.config.window);
        self.dispatcher.dispatch_all(&alerts).await;
        alerts
    }

    /// Sweep every known subject, dispatching as each one is
    /// evaluated. Returns the number of alerts raised.
    pub async fn evaluate_all(&self) -> usize {
        let mut raised = 0;
        for subject_id in self.store.subject_ids() {
            raised += self.evaluate_subject(subject_id).await.len();
        }
        raised
    }

    /// Run the monitoring loop until [`stop`](Self::stop) is called,
    /// or for a single sweep when continuous monitoring is off.
    pub async fn run(&self) {
        use std::sync::atomic::Ordering;

        self.running.store(true, Ordering::SeqCst);
        tracing::info!(
            interval_ms = self.config.eval_interval_ms,
            "monitor started"
        );

        while self.running.load(Ordering::SeqCst) {
            let raised = self.evaluate_all().await;
            tracing::debug!(raised, "evaluation sweep complete");

            if !self.config.continuous_monitoring {
                break;
            }

            tokio::time::sleep(std::time::Duration::from_millis(
                self.config.eval_interval_ms,
            ))
            .await;
        }

        tracing::info!("monitor stopped");
    }

    /// Stop the monitoring loop after the current sweep.
    pub fn stop(&self) {
        use std::sync::atomic::Ordering;
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        // Domain types
        AlertEvent,
        AlertKind,
        // Alerting
        AlertSink,
        Enrichment,
        MeasurementKind,
        MeasurementRecord,
        MemorySink,
        Monitor,
        MonitorConfig,
        // Evaluation
        Orchestrator,
        PriorityLabel,
        Result,
        SubjectId,
        SubjectStore,
        VitalError,
    };
}
