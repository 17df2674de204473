//! Rule evaluators and the orchestrator that runs them.
//!
//! Every rule family is a pure function from a window of measurement
//! records to zero or more alert events, all sharing one signature.
//! Adding a rule family means appending a function to the orchestrator's
//! registry, not implementing a new type.
//!
//! Histories may contain out-of-order appends, so each evaluator
//! re-sorts the window it receives before applying windowed logic. The
//! sort is stable: records with equal timestamps keep insertion order.

pub mod blood_pressure;
pub mod cardiac;
pub mod combined;
pub mod orchestrator;
pub mod saturation;

pub use orchestrator::{EvaluatorFn, Orchestrator, RegisteredEvaluator};

use crate::domain::{MeasurementKind, MeasurementRecord};

/// Records of the given kinds, stably sorted by timestamp.
pub(crate) fn sorted_of_kinds(
    records: &[MeasurementRecord],
    kinds: &[MeasurementKind],
) -> Vec<MeasurementRecord> {
    let mut selected: Vec<MeasurementRecord> = records
        .iter()
        .filter(|r| kinds.contains(&r.kind))
        .cloned()
        .collect();
    selected.sort_by_key(|r| r.timestamp_ms);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectId;

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let records = vec![
            MeasurementRecord::new(1, MeasurementKind::Saturation, 1.0, 50),
            MeasurementRecord::new(1, MeasurementKind::Saturation, 2.0, 50),
            MeasurementRecord::new(1, MeasurementKind::Saturation, 3.0, 10),
        ];
        let sorted = sorted_of_kinds(&records, &[MeasurementKind::Saturation]);
        let values: Vec<f64> = sorted.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn filters_to_requested_kinds() {
        let records = vec![
            MeasurementRecord::new(1, MeasurementKind::Saturation, 95.0, 0),
            MeasurementRecord::new(1, MeasurementKind::Ecg, 0.5, 1),
            MeasurementRecord::new(1, MeasurementKind::SystolicPressure, 120.0, 2),
        ];
        let sorted = sorted_of_kinds(
            &records,
            &[MeasurementKind::Saturation, MeasurementKind::SystolicPressure],
        );
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].subject_id, SubjectId::new(1));
    }
}
