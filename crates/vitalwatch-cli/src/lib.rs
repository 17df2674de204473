//! VitalWatch CLI
//!
//! Command-line interface for the vitalwatch alert evaluation engine.
//!
//! # Features
//!
//! - **replay**: Evaluate recorded feed files from a directory
//! - **listen**: Ingest a live WebSocket feed and sweep continuously
//! - **simulate**: Drive the engine with synthetic vitals
//! - **version**: Display version information
//!
//! # Usage
//!
//! ```bash
//! # Replay a directory of recorded feed files
//! vitalwatch replay ./feed --alerts-file alerts.jsonl
//!
//! # Attach to a live feed
//! vitalwatch listen ws://monitor.local:8080/feed
//!
//! # Generate synthetic vitals for four subjects
//! vitalwatch simulate --subjects 4 --ticks 100
//! ```

use clap::{Parser, Subcommand};

pub mod commands;

pub use commands::{ListenArgs, ReplayArgs, SimulateArgs};

/// VitalWatch Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "vitalwatch")]
#[command(author, version, about = "Clinical alert evaluation over vital-sign streams")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay recorded feed files through the engine
    Replay(ReplayArgs),

    /// Ingest a live WebSocket feed
    Listen(ListenArgs),

    /// Drive the engine with synthetic vitals
    Simulate(SimulateArgs),

    /// Display version information
    Version,
}
