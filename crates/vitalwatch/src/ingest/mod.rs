//! Measurement ingestion: parsing plus the file, WebSocket, and
//! synthetic sources that feed a [`SubjectStore`](crate::domain::SubjectStore).

pub mod file;
pub mod generator;
pub mod parser;
pub mod websocket;

pub use file::FileReader;
pub use generator::{GeneratorConfig, VitalsGenerator};
pub use parser::parse_line;
pub use websocket::WebSocketReader;

/// Counts of records accepted into the store and lines rejected at the
/// parsing boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    /// Records appended to the store
    pub accepted: usize,
    /// Lines rejected by the parser
    pub rejected: usize,
}
