//! Parameters structure for GridExec

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::pid::PidParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the Grid path executor.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- PATH GENERATION ----

    /// Length of each move segment.
    ///
    /// Units: length-units
    pub segment_length: f64,

    /// Number of outer iterations of the generation rule.
    pub outer_count: usize,

    /// Number of consecutive move segments forming one leg.
    pub inner_count: usize,

    // ---- CONTROLLERS ----

    /// Controller for the linear axis, output is the forward acceleration.
    pub linear_pid: PidParams,

    /// Controller for the angular axis, output is the angular acceleration.
    pub angular_pid: PidParams
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            segment_length: 100.0,
            outer_count: 4,
            inner_count: 4,
            linear_pid: PidParams {
                k_p: 2.0,
                k_i: 0.1,
                k_d: 0.5,
                min_output: -3.0,
                max_output: 15.0,
                accel_rate: 2.0
            },
            angular_pid: PidParams {
                k_p: 1.5,
                k_i: 0.05,
                k_d: 0.3,
                min_output: -10.0,
                max_output: 10.0,
                accel_rate: 2.0
            }
        }
    }
}
