//! Measurement records: one timestamped typed value for one subject.

use serde::{Deserialize, Serialize};

/// Identifier for a monitored subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(u32);

impl SubjectId {
    /// Create a subject id from its numeric value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// The signal family a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementKind {
    /// Systolic blood pressure (mmHg)
    SystolicPressure,
    /// Diastolic blood pressure (mmHg)
    DiastolicPressure,
    /// Blood oxygen saturation (%)
    Saturation,
    /// Raw ECG waveform amplitude (signed, arbitrary units)
    Ecg,
    /// Pre-derived heart rate (BPM)
    HeartRate,
}

impl MeasurementKind {
    /// Parse the wire label used by ingestion feeds.
    ///
    /// Returns `None` for labels the engine does not understand; the
    /// ingestion boundary rejects those records.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "SystolicPressure" => Some(Self::SystolicPressure),
            "DiastolicPressure" => Some(Self::DiastolicPressure),
            "Saturation" => Some(Self::Saturation),
            "ECG" => Some(Self::Ecg),
            "HeartRate" => Some(Self::HeartRate),
            _ => None,
        }
    }

    /// The label used on the wire for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SystolicPressure => "SystolicPressure",
            Self::DiastolicPressure => "DiastolicPressure",
            Self::Saturation => "Saturation",
            Self::Ecg => "ECG",
            Self::HeartRate => "HeartRate",
        }
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One timestamped measurement for one subject. Immutable once created.
///
/// Ordering key is `timestamp_ms`; ties are broken by insertion order,
/// which a stable sort over a queried window preserves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Subject the measurement belongs to
    pub subject_id: SubjectId,
    /// Signal family
    pub kind: MeasurementKind,
    /// Measured value
    pub value: f64,
    /// Measurement time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

impl MeasurementRecord {
    /// Create a new measurement record.
    pub fn new(
        subject_id: impl Into<SubjectId>,
        kind: MeasurementKind,
        value: f64,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            kind,
            value,
            timestamp_ms,
        }
    }
}
