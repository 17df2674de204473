//! Synthetic vitals generator for demos and load tests.
//!
//! Produces plausible per-subject streams: a bounded random walk for
//! saturation, noisy pressure baselines, and a sinusoid-with-noise ECG
//! waveform whose phase is continuous across ticks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{MeasurementKind, MeasurementRecord, SubjectId};

/// Configuration for the synthetic generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of subjects to simulate, ids `1..=subject_count`.
    pub subject_count: u32,
    /// ECG samples emitted per subject per tick.
    pub ecg_samples_per_tick: u32,
    /// Spacing between consecutive ECG samples in milliseconds.
    pub ecg_sample_interval_ms: i64,
    /// Simulated heart rate driving the ECG sinusoid (BPM).
    pub ecg_rate_bpm: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            subject_count: 4,
            ecg_samples_per_tick: 8,
            ecg_sample_interval_ms: 100,
            ecg_rate_bpm: 75.0,
        }
    }
}

#[derive(Debug)]
struct SubjectState {
    saturation: f64,
    systolic: f64,
    diastolic: f64,
    ecg_samples_emitted: u64,
}

/// Stateful generator producing one batch of records per tick.
pub struct VitalsGenerator {
    config: GeneratorConfig,
    states: Vec<SubjectState>,
    rng: StdRng,
}

impl VitalsGenerator {
    /// Create a generator seeded from the OS entropy source.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a deterministic generator for tests.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, mut rng: StdRng) -> Self {
        let states = (0..config.subject_count)
            .map(|_| SubjectState {
                // Healthy resting baselines with per-subject spread.
                saturation: rng.gen_range(95.0..100.0),
                systolic: rng.gen_range(110.0..130.0),
                diastolic: rng.gen_range(70.0..90.0),
                ecg_samples_emitted: 0,
            })
            .collect();
        Self {
            config,
            states,
            rng,
        }
    }

    /// Generate one batch of records stamped relative to `now_ms`.
    pub fn tick(&mut self, now_ms: i64) -> Vec<MeasurementRecord> {
        let mut records = Vec::new();

        for (index, state) in self.states.iter_mut().enumerate() {
            let subject_id = SubjectId::new(index as u32 + 1);

            // Saturation walks one point at a time, clamped to a
            // plausible band.
            state.saturation =
                (state.saturation + self.rng.gen_range(-1.0..=1.0)).clamp(90.0, 100.0);
            records.push(MeasurementRecord::new(
                subject_id,
                MeasurementKind::Saturation,
                state.saturation,
                now_ms,
            ));

            records.push(MeasurementRecord::new(
                subject_id,
                MeasurementKind::SystolicPressure,
                state.systolic + self.rng.gen_range(-5.0..=5.0),
                now_ms,
            ));
            records.push(MeasurementRecord::new(
                subject_id,
                MeasurementKind::DiastolicPressure,
                state.diastolic + self.rng.gen_range(-5.0..=5.0),
                now_ms,
            ));

            let beat_hz = self.config.ecg_rate_bpm / 60.0;
            for k in 0..self.config.ecg_samples_per_tick {
                let sample_index = state.ecg_samples_emitted + u64::from(k);
                let t_secs =
                    sample_index as f64 * self.config.ecg_sample_interval_ms as f64 / 1000.0;
                let amplitude = (2.0 * std::f64::consts::PI * beat_hz * t_secs).sin()
                    + self.rng.gen_range(-0.05..=0.05);
                records.push(MeasurementRecord::new(
                    subject_id,
                    MeasurementKind::Ecg,
                    amplitude,
                    now_ms + i64::from(k) * self.config.ecg_sample_interval_ms,
                ));
            }
            state.ecg_samples_emitted += u64::from(self.config.ecg_samples_per_tick);
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_emits_all_kinds_for_every_subject() {
        let config = GeneratorConfig {
            subject_count: 2,
            ecg_samples_per_tick: 4,
            ..GeneratorConfig::default()
        };
        let mut generator = VitalsGenerator::with_seed(config, 1);
        let records = generator.tick(1_000_000);

        // 3 scalar vitals + 4 ECG samples per subject.
        assert_eq!(records.len(), 2 * (3 + 4));
        for subject in [1u32, 2] {
            let id = SubjectId::new(subject);
            assert!(records
                .iter()
                .any(|r| r.subject_id == id && r.kind == MeasurementKind::Saturation));
            assert!(records
                .iter()
                .any(|r| r.subject_id == id && r.kind == MeasurementKind::Ecg));
        }
    }

    #[test]
    fn saturation_stays_in_band() {
        let mut generator = VitalsGenerator::with_seed(GeneratorConfig::default(), 2);
        for tick in 0..200 {
            for record in generator.tick(tick * 1000) {
                if record.kind == MeasurementKind::Saturation {
                    assert!(record.value >= 90.0 && record.value <= 100.0);
                }
            }
        }
    }

    #[test]
    fn ecg_waveform_crosses_zero() {
        let config = GeneratorConfig {
            subject_count: 1,
            ecg_samples_per_tick: 32,
            ..GeneratorConfig::default()
        };
        let mut generator = VitalsGenerator::with_seed(config, 3);
        let records = generator.tick(0);
        let ecg: Vec<f64> = records
            .iter()
            .filter(|r| r.kind == MeasurementKind::Ecg)
            .map(|r| r.value)
            .collect();
        // 3.2 s of a 75 BPM sinusoid swings through both signs.
        assert!(ecg.iter().any(|&v| v > 0.0));
        assert!(ecg.iter().any(|&v| v < 0.0));
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let mut a = VitalsGenerator::with_seed(GeneratorConfig::default(), 42);
        let mut b = VitalsGenerator::with_seed(GeneratorConfig::default(), 42);
        assert_eq!(a.tick(0), b.tick(0));
        assert_eq!(a.tick(1000), b.tick(1000));
    }
}
