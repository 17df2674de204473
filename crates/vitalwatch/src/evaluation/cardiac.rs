//! Cardiac rule family: beat detection and heart-rate derivation from a
//! raw ECG waveform.

use crate::domain::{AlertEvent, AlertKind, MeasurementKind, MeasurementRecord, PriorityLabel};

use super::sorted_of_kinds;

/// Heart rate below this fires a bradycardia alert.
pub const BRADYCARDIA_BPM: f64 = 50.0;
/// Heart rate above this fires a tachycardia alert.
pub const TACHYCARDIA_BPM: f64 = 100.0;
/// RR-interval population standard deviation above this fires an
/// irregular-beat alert, in seconds.
pub const IRREGULARITY_STD_DEV_SECS: f64 = 0.1;

/// Evaluate cardiac rules over a subject's record window.
///
/// ECG records are taken in time order and split into contiguous runs by
/// subject id; records for the same subject separated by another
/// subject's records form separate groups. Each group is analyzed
/// independently.
pub fn evaluate(records: &[MeasurementRecord]) -> Vec<AlertEvent> {
    let ecg = sorted_of_kinds(records, &[MeasurementKind::Ecg]);

    let mut alerts = Vec::new();
    let mut start = 0;
    for i in 1..=ecg.len() {
        if i == ecg.len() || ecg[i].subject_id != ecg[start].subject_id {
            analyze_group(&ecg[start..i], &mut alerts);
            start = i;
        }
    }
    alerts
}

/// Analyze one contiguous run of ECG samples for a single subject.
///
/// A beat is a negative-to-positive zero crossing: `sample[i-1] < 0`
/// and `sample[i] >= 0`. Each detected beat contributes the RR interval
/// between the crossing pair of samples, in seconds. Fewer than two
/// samples, or a run without a crossing, produces nothing.
fn analyze_group(group: &[MeasurementRecord], alerts: &mut Vec<AlertEvent>) {
    if group.len() < 2 {
        return;
    }

    let mut rr_intervals = Vec::new();
    for i in 1..group.len() {
        if group[i - 1].value < 0.0 && group[i].value >= 0.0 {
            let rr = (group[i].timestamp_ms - group[i - 1].timestamp_ms) as f64 / 1000.0;
            rr_intervals.push(rr);
        }
    }

    if rr_intervals.is_empty() {
        return;
    }

    let subject_id = group[0].subject_id;
    let detected_at = group[group.len() - 1].timestamp_ms;

    let mean_rr = rr_intervals.iter().sum::<f64>() / rr_intervals.len() as f64;
    let heart_rate = 60.0 / mean_rr;

    if heart_rate < BRADYCARDIA_BPM {
        alerts.push(
            AlertEvent::new(
                AlertKind::Cardiac,
                subject_id,
                "Bradycardia: heart rate lower than 50",
                detected_at,
            )
            .with_priority(PriorityLabel::High),
        );
    }
    if heart_rate > TACHYCARDIA_BPM {
        alerts.push(
            AlertEvent::new(
                AlertKind::Cardiac,
                subject_id,
                "Tachycardia: heart rate higher than 100",
                detected_at,
            )
            .with_priority(PriorityLabel::High),
        );
    }

    // Population standard deviation of the RR intervals.
    let variance = rr_intervals
        .iter()
        .map(|rr| (rr - mean_rr).powi(2))
        .sum::<f64>()
        / rr_intervals.len() as f64;
    if variance.sqrt() > IRREGULARITY_STD_DEV_SECS {
        alerts.push(
            AlertEvent::new(
                AlertKind::Cardiac,
                subject_id,
                "Irregular Beat Detected",
                detected_at,
            )
            .with_priority(PriorityLabel::High),
        );
    }
}
