//! Oxygen-saturation rule family: low-saturation threshold and rapid
//! adjacent-pair drops.

use crate::domain::{AlertEvent, AlertKind, MeasurementKind, MeasurementRecord, PriorityLabel};

use super::sorted_of_kinds;

/// Saturation below this fires a low-saturation alert.
pub const LOW_SATURATION: f64 = 92.0;
/// Maximum gap between adjacent readings for a rapid-drop check,
/// exclusive (10 minutes).
pub const DROP_WINDOW_MS: i64 = 600_000;
/// Minimum fall between adjacent readings to count as rapid, inclusive.
pub const DROP_POINTS: f64 = 5.0;

/// Evaluate oxygen-saturation rules over a subject's record window.
///
/// Rapid drops are checked on adjacent pairs only. A fall spread over
/// three or more readings that never crosses the pairwise threshold is
/// not detected; that is the defined semantics, not an oversight.
pub fn evaluate(records: &[MeasurementRecord]) -> Vec<AlertEvent> {
    let mut alerts = Vec::new();

    let saturation = sorted_of_kinds(records, &[MeasurementKind::Saturation]);

    for record in &saturation {
        if record.value < LOW_SATURATION {
            alerts.push(
                AlertEvent::new(
                    AlertKind::Oxygen,
                    record.subject_id,
                    "Saturation level lower than 92.0%",
                    record.timestamp_ms,
                )
                .with_priority(PriorityLabel::High),
            );
        }
    }

    for pair in saturation.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        let elapsed = later.timestamp_ms - earlier.timestamp_ms;
        let fall = earlier.value - later.value;
        if elapsed < DROP_WINDOW_MS && fall >= DROP_POINTS {
            alerts.push(
                AlertEvent::new(
                    AlertKind::Oxygen,
                    later.subject_id,
                    "Rapid Saturation Drop",
                    later.timestamp_ms,
                )
                .with_priority(PriorityLabel::High),
            );
        }
    }

    alerts
}
