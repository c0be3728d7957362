//! # Telemetry sink interface
//!
//! Each control cycle reports a pair of monitoring values to the telemetry
//! sink, together with the session-elapsed time. Which pair depends on the
//! mode: the goal-seeking loops report (distance error, linear step), the
//! path executor reports (velocity, measured acceleration).

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A sink which receives per-tick telemetry.
pub trait TelemetrySink {
    /// Record one telemetry point.
    fn update(&mut self, elapsed_s: f64, value_0: f64, value_1: f64);

    /// Flush the telemetry at the end of the run.
    fn finalize(&mut self);
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

/// A telemetry sink which discards all data.
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn update(&mut self, _elapsed_s: f64, _value_0: f64, _value_1: f64) {}

    fn finalize(&mut self) {}
}
