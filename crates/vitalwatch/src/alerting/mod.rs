//! Alert sinks and the dispatcher that fans alerts out to them.

pub mod dispatcher;
pub mod sink;

pub use dispatcher::{AlertDispatcher, DispatchConfig};
pub use sink::{AlertSink, ConsoleSink, FileSink, MemorySink, TracingSink};
