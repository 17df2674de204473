//! Blood-pressure rule family: absolute thresholds and directional
//! trends.

use crate::domain::{AlertEvent, AlertKind, MeasurementKind, MeasurementRecord, PriorityLabel};

use super::sorted_of_kinds;

/// Diastolic pressure above this fires a threshold alert.
pub const DIASTOLIC_HIGH: f64 = 120.0;
/// Diastolic pressure below this fires a threshold alert.
pub const DIASTOLIC_LOW: f64 = 60.0;
/// Systolic pressure above this fires a threshold alert.
pub const SYSTOLIC_HIGH: f64 = 180.0;
/// Systolic pressure below this fires a threshold alert.
pub const SYSTOLIC_LOW: f64 = 90.0;
/// Minimum step between consecutive readings for a trend, exclusive.
pub const TREND_STEP: f64 = 10.0;

/// Evaluate blood-pressure rules over a subject's record window.
///
/// Thresholds and trends are checked independently; the same records may
/// fire both. The trend window slides over the *merged*
/// systolic+diastolic stream, mixing the two types when they interleave.
/// That behavior is pinned by tests; per-type windows would be a
/// deliberate semantic change.
pub fn evaluate(records: &[MeasurementRecord]) -> Vec<AlertEvent> {
    let mut alerts = Vec::new();

    let merged = sorted_of_kinds(
        records,
        &[
            MeasurementKind::SystolicPressure,
            MeasurementKind::DiastolicPressure,
        ],
    );

    // Threshold checks, once per record in time order.
    for record in &merged {
        match record.kind {
            MeasurementKind::DiastolicPressure => {
                if record.value > DIASTOLIC_HIGH {
                    alerts.push(threshold_alert(record, "Diastolic Pressure higher than 120"));
                }
                if record.value < DIASTOLIC_LOW {
                    alerts.push(threshold_alert(record, "Diastolic Pressure lower than 60"));
                }
            }
            MeasurementKind::SystolicPressure => {
                if record.value > SYSTOLIC_HIGH {
                    alerts.push(threshold_alert(record, "Systolic Pressure higher than 180"));
                }
                if record.value < SYSTOLIC_LOW {
                    alerts.push(threshold_alert(record, "Systolic Pressure lower than 90"));
                }
            }
            _ => {}
        }
    }

    // Trend checks over a sliding window of three consecutive merged
    // records. Each step must exceed TREND_STEP strictly.
    for window in merged.windows(3) {
        let (a, b, c) = (&window[0], &window[1], &window[2]);
        if b.value > a.value + TREND_STEP && c.value > b.value + TREND_STEP {
            alerts.push(
                AlertEvent::new(
                    AlertKind::BloodPressure,
                    c.subject_id,
                    "Increasing Blood Pressure Trend",
                    c.timestamp_ms,
                )
                .with_priority(PriorityLabel::Medium),
            );
        }
        if b.value < a.value - TREND_STEP && c.value < b.value - TREND_STEP {
            alerts.push(
                AlertEvent::new(
                    AlertKind::BloodPressure,
                    c.subject_id,
                    "Decreasing Blood Pressure Trend",
                    c.timestamp_ms,
                )
                .with_priority(PriorityLabel::Medium),
            );
        }
    }

    alerts
}

fn threshold_alert(record: &MeasurementRecord, condition: &str) -> AlertEvent {
    AlertEvent::new(
        AlertKind::BloodPressure,
        record.subject_id,
        condition,
        record.timestamp_ms,
    )
    .with_priority(PriorityLabel::High)
}
