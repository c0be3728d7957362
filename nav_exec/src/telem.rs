//! # Telemetry writer
//!
//! [`CsvTelemetry`] archives the per-tick telemetry of a session into a CSV
//! file inside the session directory, in place of a live plot. Write errors
//! are logged but never interrupt the control loop, telemetry is monitoring
//! data, not a control dependency.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use serde::Serialize;
use std::fs::File;

// Internal
use sim_if::TelemetrySink;
use util::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One telemetry record.
///
/// The meaning of the value columns depends on the mode: the goal-seeking
/// loops log (distance error, linear step), the path executor logs
/// (velocity, measured acceleration).
#[derive(Debug, Clone, Copy, Serialize)]
struct TelemRecord {
    elapsed_s: f64,
    value_0: f64,
    value_1: f64
}

/// A telemetry sink archiving records to a CSV file in the session
/// directory.
pub struct CsvTelemetry {
    writer: csv::Writer<File>,
    num_records: u64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CsvTelemetry {
    /// Create a new CSV telemetry archive with the given file name inside
    /// the session directory.
    pub fn new(session: &Session, file_name: &str) -> Result<Self, csv::Error> {
        let mut path = session.session_root.clone();
        path.push(file_name);

        Ok(Self {
            writer: csv::Writer::from_path(path)?,
            num_records: 0
        })
    }
}

impl TelemetrySink for CsvTelemetry {
    fn update(&mut self, elapsed_s: f64, value_0: f64, value_1: f64) {
        let record = TelemRecord {
            elapsed_s,
            value_0,
            value_1
        };

        if let Err(e) = self.writer.serialize(record) {
            warn!("Could not write telemetry record: {}", e);
        }

        self.num_records += 1;
    }

    fn finalize(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("Could not flush telemetry: {}", e);
        }

        info!("Telemetry archived ({} records)", self.num_records);
    }
}
