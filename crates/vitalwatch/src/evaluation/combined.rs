//! Combined hypotensive-hypoxemia rule: low saturation and low systolic
//! pressure seen within the same evaluation window.

use crate::domain::{AlertEvent, AlertKind, MeasurementKind, MeasurementRecord, PriorityLabel};

use super::sorted_of_kinds;
use super::saturation::LOW_SATURATION;

/// Systolic pressure below this sets the hypotension flag.
pub const LOW_SYSTOLIC: f64 = 90.0;

/// Evaluate the combined condition over a subject's record window.
///
/// Scans the merged saturation+systolic stream in time order with two
/// sticky flags scoped to this call. Once both flags are set, every
/// record processed from that point on emits another alert; the flags
/// never reset within a call. Callers that want one alert per episode
/// must deduplicate downstream.
pub fn evaluate(records: &[MeasurementRecord]) -> Vec<AlertEvent> {
    let merged = sorted_of_kinds(
        records,
        &[MeasurementKind::Saturation, MeasurementKind::SystolicPressure],
    );

    let mut alerts = Vec::new();
    let mut low_saturation_seen = false;
    let mut low_systolic_seen = false;

    for record in &merged {
        match record.kind {
            MeasurementKind::Saturation if record.value < LOW_SATURATION => {
                low_saturation_seen = true;
            }
            MeasurementKind::SystolicPressure if record.value < LOW_SYSTOLIC => {
                low_systolic_seen = true;
            }
            _ => {}
        }

        if low_saturation_seen && low_systolic_seen {
            alerts.push(
                AlertEvent::new(
                    AlertKind::Combined,
                    record.subject_id,
                    "Hypotensive Hypoxemia",
                    record.timestamp_ms,
                )
                .with_priority(PriorityLabel::Critical),
            );
        }
    }

    alerts
}
