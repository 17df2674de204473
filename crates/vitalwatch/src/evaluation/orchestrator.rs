//! Evaluation orchestrator: runs the ordered evaluator registry over a
//! subject's history window.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::domain::{AlertEvent, MeasurementRecord, SubjectId, SubjectStore};

use super::{blood_pressure, cardiac, combined, saturation};

/// Signature shared by every rule evaluator.
pub type EvaluatorFn = fn(&[MeasurementRecord]) -> Vec<AlertEvent>;

/// A named entry in the evaluator registry.
#[derive(Clone, Copy)]
pub struct RegisteredEvaluator {
    /// Name used in log events
    pub name: &'static str,
    /// The evaluator function
    pub run: EvaluatorFn,
}

/// Runs rule evaluators over record windows in a fixed order.
///
/// Evaluators are held in an ordered list; adding a rule family means
/// appending a function. Emitted alerts keep registry order, and within
/// one evaluator the order its rules are checked. No deduplication is
/// performed: the same underlying anomaly can yield several structurally
/// distinct alerts.
pub struct Orchestrator {
    evaluators: Vec<RegisteredEvaluator>,
}

impl Orchestrator {
    /// Create an orchestrator with an empty registry.
    pub fn new() -> Self {
        Self {
            evaluators: Vec::new(),
        }
    }

    /// Create an orchestrator with the standard clinical rule families,
    /// in evaluation order: blood pressure, saturation, combined,
    /// cardiac.
    pub fn with_default_rules() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.register("blood_pressure", blood_pressure::evaluate);
        orchestrator.register("saturation", saturation::evaluate);
        orchestrator.register("combined", combined::evaluate);
        orchestrator.register("cardiac", cardiac::evaluate);
        orchestrator
    }

    /// Append an evaluator to the registry.
    pub fn register(&mut self, name: &'static str, run: EvaluatorFn) {
        self.evaluators.push(RegisteredEvaluator { name, run });
    }

    /// Number of registered evaluators.
    pub fn evaluator_count(&self) -> usize {
        self.evaluators.len()
    }

    /// Run every registered evaluator over a record window.
    ///
    /// A panicking evaluator is logged and skipped; it never takes the
    /// remaining evaluators (or other subjects) down with it.
    pub fn evaluate_window(&self, records: &[MeasurementRecord]) -> Vec<AlertEvent> {
        let mut alerts = Vec::new();
        for evaluator in &self.evaluators {
            match catch_unwind(AssertUnwindSafe(|| (evaluator.run)(records))) {
                Ok(mut emitted) => alerts.append(&mut emitted),
                Err(_) => {
                    tracing::error!(
                        evaluator = evaluator.name,
                        "rule evaluator panicked; skipping"
                    );
                }
            }
        }
        alerts
    }

    /// Evaluate one subject over its full retained window, or over a
    /// caller-specified `[from, to]` window.
    pub fn evaluate_subject(
        &self,
        store: &SubjectStore,
        subject_id: SubjectId,
        window: Option<(i64, i64)>,
    ) -> Vec<AlertEvent> {
        let records = match window {
            Some((from, to)) => store.query(subject_id, from, to),
            None => store.full_window(subject_id),
        };
        self.evaluate_window(&records)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlertKind, MeasurementKind};

    fn make_record(kind: MeasurementKind, value: f64, ts: i64) -> MeasurementRecord {
        MeasurementRecord::new(1, kind, value, ts)
    }

    #[test]
    fn default_registry_has_four_families() {
        let orchestrator = Orchestrator::with_default_rules();
        assert_eq!(orchestrator.evaluator_count(), 4);
    }

    #[test]
    fn alerts_keep_registry_order() {
        let orchestrator = Orchestrator::with_default_rules();
        let records = vec![
            // Fires a blood-pressure threshold, a low saturation, the
            // combined condition, and a bradycardia.
            make_record(MeasurementKind::SystolicPressure, 85.0, 0),
            make_record(MeasurementKind::Saturation, 88.0, 1),
            make_record(MeasurementKind::Ecg, -0.5, 2),
            make_record(MeasurementKind::Ecg, 0.7, 2002),
            make_record(MeasurementKind::Ecg, -0.5, 4002),
            make_record(MeasurementKind::Ecg, 0.7, 6002),
        ];
        let alerts = orchestrator.evaluate_window(&records);
        let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::BloodPressure,
                AlertKind::Oxygen,
                AlertKind::Combined,
                AlertKind::Cardiac,
            ]
        );
    }

    #[test]
    fn empty_window_yields_no_alerts() {
        let orchestrator = Orchestrator::with_default_rules();
        assert!(orchestrator.evaluate_window(&[]).is_empty());
    }

    #[test]
    fn unknown_subject_yields_no_alerts() {
        let orchestrator = Orchestrator::with_default_rules();
        let store = SubjectStore::new();
        let alerts = orchestrator.evaluate_subject(&store, SubjectId::new(42), None);
        assert!(alerts.is_empty());
    }

    #[test]
    fn caller_specified_window_limits_evaluation() {
        let orchestrator = Orchestrator::with_default_rules();
        let store = SubjectStore::new();
        store.append(make_record(MeasurementKind::Saturation, 85.0, 100));
        store.append(make_record(MeasurementKind::Saturation, 86.0, 900));

        let all = orchestrator.evaluate_subject(&store, SubjectId::new(1), None);
        assert_eq!(all.len(), 2);

        let windowed =
            orchestrator.evaluate_subject(&store, SubjectId::new(1), Some((0, 500)));
        assert_eq!(windowed.len(), 1);
    }

    #[test]
    fn panicking_evaluator_is_isolated() {
        fn faulty(_records: &[MeasurementRecord]) -> Vec<AlertEvent> {
            panic!("evaluator bug");
        }

        let mut orchestrator = Orchestrator::new();
        orchestrator.register("faulty", faulty);
        orchestrator.register("saturation", crate::evaluation::saturation::evaluate);

        let records = vec![make_record(MeasurementKind::Saturation, 85.0, 0)];
        let alerts = orchestrator.evaluate_window(&records);
        // The healthy evaluator still ran.
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn idempotent_over_unchanged_history() {
        let orchestrator = Orchestrator::with_default_rules();
        let store = SubjectStore::new();
        store.append(make_record(MeasurementKind::DiastolicPressure, 125.0, 0));
        store.append(make_record(MeasurementKind::Saturation, 88.0, 1));

        let first = orchestrator.evaluate_subject(&store, SubjectId::new(1), None);
        let second = orchestrator.evaluate_subject(&store, SubjectId::new(1), None);
        assert_eq!(first, second);
    }
}
