//! Domain types: measurement records, per-subject histories, and alert
//! events.

pub mod alert;
pub mod history;
pub mod record;

pub use alert::{AlertEvent, AlertKind, Enrichment, PriorityLabel};
pub use history::{SubjectHistory, SubjectStore};
pub use record::{MeasurementKind, MeasurementRecord, SubjectId};
