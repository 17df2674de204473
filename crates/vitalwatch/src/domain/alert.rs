//! Alert events emitted by rule evaluators.

use serde::{Deserialize, Serialize};

use super::record::SubjectId;

/// Rule family that produced an alert.
///
/// Construction of category-specific alerts is a plain `match` over this
/// tag; there is no per-category constructor hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Blood-pressure thresholds and trends
    BloodPressure,
    /// Oxygen-saturation thresholds and rapid drops
    Oxygen,
    /// Combined hypotensive-hypoxemia condition
    Combined,
    /// Cardiac/ECG-derived conditions
    Cardiac,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BloodPressure => write!(f, "blood-pressure"),
            Self::Oxygen => write!(f, "oxygen"),
            Self::Combined => write!(f, "combined"),
            Self::Cardiac => write!(f, "cardiac"),
        }
    }
}

/// Priority label attached to an alert at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityLabel {
    /// Immediate action required
    Critical,
    /// Urgent attention needed
    High,
    /// Important but not urgent
    Medium,
    /// Informational
    Low,
}

impl std::fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Enrichment attached to an alert event at emission time.
///
/// Enrichments are additional attributes carried by the event value, not
/// mutations of it. The repeat directive is a sink-side policy: the
/// dispatcher schedules re-emissions instead of blocking the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Enrichment {
    /// Priority label for the alert
    Priority(PriorityLabel),
    /// Re-emit the alert `count` extra times, `interval_ms` apart
    Repeat {
        /// Number of extra emissions
        count: u32,
        /// Delay between emissions in milliseconds
        interval_ms: u64,
    },
}

/// An alert emitted by exactly one rule evaluator invocation.
///
/// Produced once, never mutated, handed to the alert sinks and not
/// stored for later query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Subject the alert concerns
    pub subject_id: String,
    /// Rule family that produced the alert
    pub kind: AlertKind,
    /// Human-readable description of the rule condition
    pub condition: String,
    /// Detection time in milliseconds since the Unix epoch
    pub detected_at_ms: i64,
    /// Enrichments attached at emission time
    pub enrichments: Vec<Enrichment>,
}

impl AlertEvent {
    /// Create a new alert event with no enrichments.
    pub fn new(
        kind: AlertKind,
        subject_id: SubjectId,
        condition: impl Into<String>,
        detected_at_ms: i64,
    ) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            kind,
            condition: condition.into(),
            detected_at_ms,
            enrichments: Vec::new(),
        }
    }

    /// Attach a priority label.
    pub fn with_priority(mut self, priority: PriorityLabel) -> Self {
        self.enrichments.push(Enrichment::Priority(priority));
        self
    }

    /// Attach a repeat directive for the dispatcher.
    pub fn with_repeat(mut self, count: u32, interval_ms: u64) -> Self {
        self.enrichments.push(Enrichment::Repeat { count, interval_ms });
        self
    }

    /// The attached priority label, if any.
    pub fn priority(&self) -> Option<PriorityLabel> {
        self.enrichments.iter().find_map(|e| match e {
            Enrichment::Priority(p) => Some(*p),
            _ => None,
        })
    }

    /// The attached repeat directive, if any.
    pub fn repeat(&self) -> Option<(u32, u64)> {
        self.enrichments.iter().find_map(|e| match e {
            Enrichment::Repeat { count, interval_ms } => Some((*count, *interval_ms)),
            _ => None,
        })
    }
}

impl std::fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] subject {}: {} at {}",
            self.kind, self.subject_id, self.condition, self.detected_at_ms
        )
    }
}
