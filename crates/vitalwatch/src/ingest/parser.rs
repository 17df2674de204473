//! Wire-format parsing for ingestion feeds.
//!
//! All feeds share one line format:
//!
//! ```text
//! subject_id,timestamp_ms,kind,value
//! ```
//!
//! Saturation feeds may suffix the value with `%` (`97.0%`); the suffix
//! is stripped. Anything malformed is rejected here, at the boundary;
//! the engine assumes records that reach it are type- and value-valid.

use crate::domain::{MeasurementKind, MeasurementRecord, SubjectId};
use crate::VitalError;

/// Parse one feed line into a measurement record.
pub fn parse_line(line: &str) -> Result<MeasurementRecord, VitalError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(VitalError::Ingest(format!(
            "expected 4 fields, got {}: {line:?}",
            parts.len()
        )));
    }

    let subject_id: u32 = parts[0]
        .parse()
        .map_err(|_| VitalError::Ingest(format!("invalid subject id {:?}", parts[0])))?;

    let timestamp_ms: i64 = parts[1]
        .parse()
        .map_err(|_| VitalError::Ingest(format!("invalid timestamp {:?}", parts[1])))?;

    let kind = MeasurementKind::from_label(parts[2])
        .ok_or_else(|| VitalError::Ingest(format!("unknown measurement kind {:?}", parts[2])))?;

    let raw_value = parts[3].strip_suffix('%').unwrap_or(parts[3]);
    let value: f64 = raw_value
        .parse()
        .map_err(|_| VitalError::Ingest(format!("invalid value {:?}", parts[3])))?;

    Ok(MeasurementRecord::new(
        SubjectId::new(subject_id),
        kind,
        value,
        timestamp_ms,
    ))
}
